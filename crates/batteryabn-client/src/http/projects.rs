/*
[INPUT]:  Project names
[OUTPUT]: Project listings and project detail
[POS]:    HTTP layer - project endpoints
[UPDATE]: When adding new project endpoints or changing response format
*/

use crate::http::{BatteryClient, Result};
use crate::types::Project;
use reqwest::Method;

impl BatteryClient {
    /// List every project
    ///
    /// GET /projects/
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let builder = self.request(Method::GET, &["projects", ""])?;
        self.send_json(builder).await
    }

    /// List names of projects that have data on disk but no database entry
    ///
    /// GET /projects/unlisted
    pub async fn list_unlisted_projects(&self) -> Result<Vec<String>> {
        let builder = self.request(Method::GET, &["projects", "unlisted"])?;
        self.send_json(builder).await
    }

    /// Fetch a single project
    ///
    /// GET /projects/{name}
    pub async fn get_project(&self, name: &str) -> Result<Project> {
        let builder = self.request(Method::GET, &["projects", name])?;
        self.send_json(builder).await
    }
}
