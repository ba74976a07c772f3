// Server endpoint
//
// `GET /1.0` carries the server config and host environment that the
// console reads to decide which network types are available.

use tracing::debug;

use crate::client::LxdClient;
use crate::error::Error;
use crate::models::ServerInfo;

impl LxdClient {
    /// Fetch server configuration and environment.
    ///
    /// `GET /1.0`
    pub async fn get_server(&self) -> Result<ServerInfo, Error> {
        let url = self.base_url().join("/1.0")?;
        debug!("fetching server info");
        self.get(url).await
    }
}
