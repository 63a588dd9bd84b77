const DEFAULT_ORDER: &str = "dph";

/// Builder for the marketplace's offer-search filter.
///
/// Renders clauses in the marketplace's space-separated query grammar,
/// e.g. `reliability > 0.9 cuda_vers >= 11.7 num_gpus = 1 gpu_ram >= 24`.
/// Unset fields render nothing; an empty query defers entirely to the
/// marketplace's defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferQuery {
    pub min_reliability: Option<f64>,
    pub min_cuda: Option<f64>,
    pub num_gpus: Option<u32>,
    pub min_gpu_ram: Option<f64>,
    pub min_inet_down: Option<f64>,
    pub min_inet_up: Option<f64>,
    pub min_disk: Option<f64>,
    /// Sort column, cheapest-first price when unset.
    pub order: Option<String>,
}

impl OfferQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline filter for one reliable, high-memory GPU with fast
    /// networking and room for a training dataset.
    pub fn single_gpu() -> Self {
        Self::new()
            .with_min_reliability(0.9)
            .with_min_cuda(11.7)
            .with_num_gpus(1)
            .with_min_gpu_ram(24.0)
            .with_min_inet_down(700.0)
            .with_min_inet_up(500.0)
            .with_min_disk(50.0)
    }

    pub fn with_min_reliability(mut self, v: f64) -> Self {
        self.min_reliability = Some(v);
        self
    }

    pub fn with_min_cuda(mut self, v: f64) -> Self {
        self.min_cuda = Some(v);
        self
    }

    pub fn with_num_gpus(mut self, v: u32) -> Self {
        self.num_gpus = Some(v);
        self
    }

    pub fn with_min_gpu_ram(mut self, v: f64) -> Self {
        self.min_gpu_ram = Some(v);
        self
    }

    pub fn with_min_inet_down(mut self, v: f64) -> Self {
        self.min_inet_down = Some(v);
        self
    }

    pub fn with_min_inet_up(mut self, v: f64) -> Self {
        self.min_inet_up = Some(v);
        self
    }

    pub fn with_min_disk(mut self, v: f64) -> Self {
        self.min_disk = Some(v);
        self
    }

    pub fn with_order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    /// Render the filter string for the search endpoint.
    pub fn render(&self) -> String {
        let mut clauses = Vec::new();
        if let Some(v) = self.min_reliability {
            clauses.push(format!("reliability > {v}"));
        }
        if let Some(v) = self.min_cuda {
            clauses.push(format!("cuda_vers >= {v}"));
        }
        if let Some(v) = self.num_gpus {
            clauses.push(format!("num_gpus = {v}"));
        }
        if let Some(v) = self.min_gpu_ram {
            clauses.push(format!("gpu_ram >= {v}"));
        }
        if let Some(v) = self.min_inet_down {
            clauses.push(format!("inet_down >= {v}"));
        }
        if let Some(v) = self.min_inet_up {
            clauses.push(format!("inet_up >= {v}"));
        }
        if let Some(v) = self.min_disk {
            clauses.push(format!("disk_space >= {v}"));
        }
        clauses.join(" ")
    }

    pub fn order(&self) -> &str {
        self.order.as_deref().unwrap_or(DEFAULT_ORDER)
    }
}
