// Network endpoints
//
// CRUD for managed networks. `PUT` replaces the full config map, so callers
// always send the complete model produced by the form mapper.

use tracing::debug;

use crate::client::LxdClient;
use crate::error::Error;
use crate::models::{NetworkDto, NetworkPut, NetworksPost};

impl LxdClient {
    /// List networks (managed and host interfaces).
    ///
    /// `GET /1.0/networks?recursion=1`
    pub async fn list_networks(&self) -> Result<Vec<NetworkDto>, Error> {
        let url = self.list_url("networks")?;
        debug!("listing networks");
        self.get(url).await
    }

    /// Fetch a single network.
    ///
    /// `GET /1.0/networks/{name}`
    pub async fn get_network(&self, name: &str) -> Result<NetworkDto, Error> {
        let url = self.api_url(&format!("networks/{name}"))?;
        debug!(name, "fetching network");
        self.get(url).await
    }

    /// Create a managed network.
    ///
    /// `POST /1.0/networks`
    pub async fn create_network(&self, body: &NetworksPost) -> Result<(), Error> {
        let url = self.api_url("networks")?;
        debug!(name = %body.name, network_type = %body.network_type, "creating network");
        self.post(url, body).await
    }

    /// Replace a network's description and config.
    ///
    /// `PUT /1.0/networks/{name}`
    pub async fn update_network(&self, name: &str, body: &NetworkPut) -> Result<(), Error> {
        let url = self.api_url(&format!("networks/{name}"))?;
        debug!(name, keys = body.config.len(), "updating network");
        self.put(url, body).await
    }

    /// Delete a managed network.
    ///
    /// `DELETE /1.0/networks/{name}`
    pub async fn delete_network(&self, name: &str) -> Result<(), Error> {
        let url = self.api_url(&format!("networks/{name}"))?;
        debug!(name, "deleting network");
        self.delete(url).await
    }
}
