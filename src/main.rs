#[tokio::main]
async fn main() {
  if let Err(e) = fit_tracker_lib::run().await {
    eprintln!("fit-tracker: {}", e);
    std::process::exit(1);
  }
}
