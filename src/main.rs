use linkize_survey::start_server;

#[tokio::main]
async fn main() {
    if let Err(err) = start_server().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
