// Instance endpoints
//
// Listing plus the `PUT /state` lifecycle call used by every action button.

use tracing::debug;

use crate::client::LxdClient;
use crate::error::Error;
use crate::models::{InstanceDto, InstanceStatePut};

impl LxdClient {
    /// List instances with full state.
    ///
    /// `GET /1.0/instances?recursion=1`
    pub async fn list_instances(&self) -> Result<Vec<InstanceDto>, Error> {
        let url = self.list_url("instances")?;
        debug!("listing instances");
        self.get(url).await
    }

    /// Fetch a single instance.
    ///
    /// `GET /1.0/instances/{name}`
    pub async fn get_instance(&self, name: &str) -> Result<InstanceDto, Error> {
        let url = self.api_url(&format!("instances/{name}"))?;
        debug!(name, "fetching instance");
        self.get(url).await
    }

    /// Change an instance's runtime state and wait for the operation.
    ///
    /// `PUT /1.0/instances/{name}/state` with
    /// `{"action": "stop", "timeout": -1, "force": false, "stateful": false}`
    pub async fn change_instance_state(
        &self,
        name: &str,
        body: &InstanceStatePut,
    ) -> Result<(), Error> {
        let url = self.api_url(&format!("instances/{name}/state"))?;
        debug!(name, action = %body.action, force = body.force, "changing instance state");
        self.put(url, body).await
    }
}
