use anyhow::Result;
use atasradar_lib::{Client, GeneralDashboard};
use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use super::{cancel_on_shutdown, settle_view_load, today};
use crate::output::{print_dashboard, OutputFormat};

pub async fn run(client: &Client, format: &OutputFormat, shutdown: &CancellationToken) -> Result<()> {
    let today = today();
    let total_atas = load_total(client, today, shutdown).await?;
    print_dashboard(today, total_atas, format)
}

/// Total the dashboard displays; `None` when the fetch failed.
async fn load_total(
    client: &Client,
    today: NaiveDate,
    shutdown: &CancellationToken,
) -> Result<Option<i64>> {
    let mut dashboard = GeneralDashboard::new(client);
    cancel_on_shutdown(shutdown, dashboard.resource().cancellation_token());
    settle_view_load(dashboard.load(today).await)?;
    Ok(dashboard.total_atas())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::build_dashboard_row;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[tokio::test]
    async fn server_error_still_renders_placeholder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::with_base_url(&server.uri());
        let total = load_total(&client, fixed_day(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(total, None);
        assert_eq!(build_dashboard_row(fixed_day(), total).total_atas, "-");
    }

    #[tokio::test]
    async fn success_renders_total() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "resultado": [],
                "totalRegistros": 1834
            })))
            .mount(&server)
            .await;

        let client = Client::with_base_url(&server.uri());
        let total = load_total(&client, fixed_day(), &CancellationToken::new())
            .await
            .unwrap();
        assert_eq!(build_dashboard_row(fixed_day(), total).total_atas, "1.834");
    }
}
