#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    guestlist_backend::run().await;
}
