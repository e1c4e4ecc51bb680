use std::process::ExitCode;

use suman::presentation::cli::CliApp;

#[tokio::main]
async fn main() -> ExitCode {
    // Logging is initialized once the configuration is loaded
    let app = CliApp::new();
    app.run().await.into()
}
