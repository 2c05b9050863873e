// === Entry point for desktop ===
#[allow(dead_code)]
#[tokio::main(flavor = "multi_thread")]
pub async fn main() {
    super::run::native_main().await;
}
