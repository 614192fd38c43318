use signalscope_core::SignalConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn SignalConnector> {
    match std::env::var("SIGNALSCOPE_BASE_URL") {
        Ok(base) => match signalscope_http::HttpConnector::new(&base) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                eprintln!("invalid SIGNALSCOPE_BASE_URL ({e}); falling back to the mock");
                Arc::new(signalscope_mock::MockConnector::new())
            }
        },
        Err(_) => {
            println!("--- (Using Mock Connector; set SIGNALSCOPE_BASE_URL for a live backend) ---");
            Arc::new(signalscope_mock::MockConnector::new())
        }
    }
}

pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("signalscope=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
