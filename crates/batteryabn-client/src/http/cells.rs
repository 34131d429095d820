/*
[INPUT]:  Cell names, project names, search keywords, and plot indices
[OUTPUT]: Cell listings, cell detail, latest summaries, and plot blobs
[POS]:    HTTP layer - cell endpoints
[UPDATE]: When adding new cell endpoints or changing response format
[UPDATE]: 2026-10-04 Add joined plot image fetch
*/

use bytes::Bytes;
use futures_util::future::try_join_all;
use reqwest::Method;

use crate::http::{BatteryClient, Result};
use crate::types::{Cell, LatestInfo};

impl BatteryClient {
    /// List the cells of a project
    ///
    /// GET /cells/project/{name}
    pub async fn list_cells_by_project(&self, project_name: &str) -> Result<Vec<Cell>> {
        let builder = self.request(Method::GET, &["cells", "project", project_name])?;
        self.send_json(builder).await
    }

    /// Fetch a single cell
    ///
    /// GET /cells/{name}
    pub async fn get_cell(&self, name: &str) -> Result<Cell> {
        let builder = self.request(Method::GET, &["cells", name])?;
        self.send_json(builder).await
    }

    /// Search cells by keyword
    ///
    /// GET /cells/search/{keyword}
    pub async fn search_cells(&self, keyword: &str) -> Result<Vec<Cell>> {
        let builder = self.request(Method::GET, &["cells", "search", keyword])?;
        self.send_json(builder).await
    }

    /// Fetch a rendered plot image
    ///
    /// GET /cells/{name}/images/{index}
    pub async fn get_cell_image(&self, name: &str, index: usize) -> Result<Bytes> {
        let index = index.to_string();
        let builder = self.request(Method::GET, &["cells", name, "images", &index])?;
        self.send_bytes(builder).await
    }

    /// Fetch several plot images concurrently.
    ///
    /// Results keep the order of `indices`; any single failure fails the whole join.
    pub async fn get_cell_images(&self, name: &str, indices: &[usize]) -> Result<Vec<Bytes>> {
        try_join_all(indices.iter().map(|index| self.get_cell_image(name, *index))).await
    }

    /// Fetch the interactive HTML document behind a plot
    ///
    /// GET /cells/{name}/htmls/{index}
    pub async fn get_cell_html(&self, name: &str, index: usize) -> Result<Bytes> {
        let index = index.to_string();
        let builder = self.request(Method::GET, &["cells", name, "htmls", &index])?;
        self.send_bytes(builder).await
    }

    /// Latest test summary for a cell
    ///
    /// GET /cells/{name}/info/latest
    pub async fn get_latest_info(&self, name: &str) -> Result<LatestInfo> {
        let builder = self.request(Method::GET, &["cells", name, "info", "latest"])?;
        self.send_json(builder).await
    }
}
