//! Vendor-CLI transport: shells out to the marketplace's own
//! executable with `--raw` and parses its stdout JSON.

use std::process::Stdio;

use serde::de::DeserializeOwned;
use tokio::process::Command;
use tracing::debug;

use rigup_model::{CreateRequest, Instance, InstanceId, Offer, OfferId, OfferQuery};

use crate::client::MarketClient;
use crate::errors::MarketError;
use crate::response::{AckResponse, CreateResponse};

impl MarketClient {
    pub(crate) async fn cli_search_offers(
        &self,
        program: &str,
        query: &OfferQuery,
    ) -> Result<Vec<Offer>, MarketError> {
        let args = vec![
            "search".to_string(),
            "offers".to_string(),
            "--raw".to_string(),
            query.render(),
            "-o".to_string(),
            query.order().to_string(),
        ];
        let stdout = self.run_raw(program, args).await?;
        parse_raw(&stdout, "offer search output")
    }

    pub(crate) async fn cli_create_instance(
        &self,
        program: &str,
        offer: OfferId,
        request: &CreateRequest,
    ) -> Result<InstanceId, MarketError> {
        let mut args = vec![
            "create".to_string(),
            "instance".to_string(),
            "--raw".to_string(),
            offer.to_string(),
            "--image".to_string(),
            request.image.clone(),
            "--disk".to_string(),
            request.disk_gb.to_string(),
        ];
        if let Some(cmd) = &request.onstart_cmd {
            args.push("--onstart-cmd".to_string());
            args.push(cmd.clone());
        }
        if request.jupyter {
            args.push("--jupyter".to_string());
        }
        if request.jupyter_lab {
            args.push("--jupyter-lab".to_string());
        }
        for (key, value) in &request.env {
            args.push("--env".to_string());
            args.push(format!("{key}={value}"));
        }

        let stdout = self.run_raw(program, args).await?;
        let created: CreateResponse = parse_raw(&stdout, "create instance output")?;
        if created.success == Some(false) {
            return Err(MarketError::Rejected("create instance"));
        }
        Ok(created.new_contract)
    }

    pub(crate) async fn cli_list_instances(
        &self,
        program: &str,
    ) -> Result<Vec<Instance>, MarketError> {
        let args = vec![
            "show".to_string(),
            "instances".to_string(),
            "--raw".to_string(),
        ];
        let stdout = self.run_raw(program, args).await?;
        parse_raw(&stdout, "instance listing output")
    }

    pub(crate) async fn cli_logs(
        &self,
        program: &str,
        id: InstanceId,
    ) -> Result<String, MarketError> {
        self.run_raw(program, vec!["logs".to_string(), id.to_string()])
            .await
    }

    pub(crate) async fn cli_destroy_instance(
        &self,
        program: &str,
        id: InstanceId,
    ) -> Result<(), MarketError> {
        let args = vec![
            "destroy".to_string(),
            "instance".to_string(),
            id.to_string(),
            "--raw".to_string(),
        ];
        let stdout = self.run_raw(program, args).await?;
        let ack: AckResponse = parse_raw(&stdout, "destroy instance output")?;
        if !ack.success {
            return Err(MarketError::Rejected("destroy instance"));
        }
        Ok(())
    }

    /// Run the vendor executable once, capturing stdio. The API key is
    /// appended as an argument and kept out of the log line.
    async fn run_raw(&self, program: &str, args: Vec<String>) -> Result<String, MarketError> {
        debug!(program, ?args, "invoking marketplace CLI");
        let mut cmd = Command::new(program);
        cmd.args(&args);
        cmd.arg("--api-key").arg(&self.config.api_key);
        cmd.stdin(Stdio::null());

        let output = cmd.output().await.map_err(|source| MarketError::CliSpawn {
            program: program.to_string(),
            source,
        })?;
        if !output.status.success() {
            return Err(MarketError::CliExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

fn parse_raw<T: DeserializeOwned>(stdout: &str, context: &'static str) -> Result<T, MarketError> {
    serde_json::from_str(stdout.trim()).map_err(|source| MarketError::Decode { context, source })
}

#[cfg(test)]
mod tests {
    use crate::config::{MarketConfig, MarketTransport};

    use super::*;

    fn cli_client(program: &str) -> MarketClient {
        let config = MarketConfig::new("test-key")
            .unwrap()
            .with_transport(MarketTransport::Cli {
                program: program.to_string(),
            });
        MarketClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let client = cli_client("rigup-no-such-cli");
        let err = client.list_instances().await.unwrap_err();
        assert!(matches!(err, MarketError::CliSpawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_surfaces_the_code() {
        let client = cli_client("false");
        let err = client.list_instances().await.unwrap_err();
        match err {
            MarketError::CliExit { code, .. } => assert_eq!(code, 1),
            other => panic!("expected CliExit, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_json_stdout_is_a_schema_error() {
        // `echo` exits 0 and prints the arguments back, which is not
        // valid listing JSON.
        let client = cli_client("echo");
        let err = client.list_instances().await.unwrap_err();
        assert!(matches!(err, MarketError::Decode { .. }));
    }
}
