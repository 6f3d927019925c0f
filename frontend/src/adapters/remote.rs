use crate::config::api_url;
use async_trait::async_trait;
use common::diagnostics::ports::{DiagnosticsRemote, RemoteReply};
use common::diagnostics::RemoteError;
use common::requests::SaveDiagnosticsRequest;
use gloo_net::http::Request;

pub struct HttpDiagnosticsRemote {
    base_url: String,
}

impl Default for HttpDiagnosticsRemote {
    fn default() -> Self {
        Self {
            base_url: api_url().trim_end_matches('/').to_string(),
        }
    }
}

fn transport(err: gloo_net::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl DiagnosticsRemote for HttpDiagnosticsRemote {
    async fn fetch_diagnostics(&self, token: &str) -> Result<RemoteReply, RemoteError> {
        let response = Request::get(&format!("{}/get-diagnostics-by-canteen", self.base_url))
            .header("Authorization", &format!("Bearer {token}"))
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;
        Ok(RemoteReply { status, body })
    }

    async fn save_diagnostics(
        &self,
        token: &str,
        request: &SaveDiagnosticsRequest,
    ) -> Result<u16, RemoteError> {
        let response = Request::post(&format!("{}/save-diagnostics", self.base_url))
            .header("Authorization", &format!("Bearer {token}"))
            .json(request)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        Ok(response.status())
    }
}
