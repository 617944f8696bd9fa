use doctorfinder_domain::constants::LIVENESS_MESSAGE;

pub async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}
