/*
[INPUT]:  Cell names, test-record names, optional test type, search keywords
[OUTPUT]: Test-record listings and detail
[POS]:    HTTP layer - test record endpoints
[UPDATE]: When adding new test record endpoints or changing query parameters
*/

use crate::http::{BatteryClient, Result};
use crate::types::TestRecord;
use reqwest::Method;

impl BatteryClient {
    /// List test records of a cell
    ///
    /// GET /trs/cell/{name}
    pub async fn list_test_records_by_cell(&self, cell_name: &str) -> Result<Vec<TestRecord>> {
        let builder = self.request(Method::GET, &["trs", "cell", cell_name])?;
        self.send_json(builder).await
    }

    /// Fetch a single test record
    ///
    /// GET /trs/{name}?test_type={test_type}
    pub async fn get_test_record(&self, name: &str, test_type: Option<&str>) -> Result<TestRecord> {
        let mut builder = self.request(Method::GET, &["trs", name])?;
        if let Some(test_type) = test_type {
            builder = builder.query(&[("test_type", test_type)]);
        }
        self.send_json(builder).await
    }

    /// Search test records by keyword
    ///
    /// GET /trs/search/{keyword}
    pub async fn search_test_records(&self, keyword: &str) -> Result<Vec<TestRecord>> {
        let builder = self.request(Method::GET, &["trs", "search", keyword])?;
        self.send_json(builder).await
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{BatteryClient, ClientConfig};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BatteryClient {
        BatteryClient::with_config(ClientConfig {
            base_url: format!("{}/api", server.uri()),
            ..ClientConfig::default()
        })
        .expect("client init")
    }

    #[tokio::test]
    async fn test_get_test_record_with_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/trs/TR_01"))
            .and(query_param("test_type", "Cycling"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "test_name": "TR_01",
                "test_type": "Cycling",
                "cell_name": "CELL_A",
                "start_time": 1700000000,
                "last_update_time": 1700003600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let record = client_for(&server)
            .get_test_record("TR_01", Some("Cycling"))
            .await
            .expect("get_test_record failed");
        assert_eq!(record.test_type.as_deref(), Some("Cycling"));
        assert_eq!(record.last_update_time, Some(1_700_003_600));
    }

    #[tokio::test]
    async fn test_search_test_records_empty() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/trs/search/none"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server)
            .search_test_records("none")
            .await
            .expect("search_test_records failed");
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_list_test_records_by_cell() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/trs/cell/CELL_A"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"test_name": "TR_01", "cell_name": "CELL_A"},
                {"test_name": "TR_02", "cell_name": "CELL_A"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let records = client_for(&server)
            .list_test_records_by_cell("CELL_A")
            .await
            .expect("list_test_records_by_cell failed");
        let names: Vec<_> = records.iter().map(|tr| tr.test_name.as_str()).collect();
        assert_eq!(names, ["TR_01", "TR_02"]);
    }
}
