use crate::types::push::Subscription;

pub trait PushSender: Clone + Send + Sync + 'static {
    type Error: std::fmt::Display + Send + Sync + 'static;
    type Fut<'a>: Future<Output = Result<(), Self::Error>> + Send + 'a
    where
        Self: 'a;

    fn send<'a>(&'a self, subscription: &'a Subscription, payload: &'a str) -> Self::Fut<'a>;

    /// Whether the failure means the push service has permanently dropped
    /// the endpoint and the stored record should be pruned.
    fn is_endpoint_gone(error: &Self::Error) -> bool {
        let _ = error;
        false
    }
}
