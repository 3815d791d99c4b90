pub(crate) mod vapid;

use crate::ports::PushSender;
use crate::store::SubscriptionStore;

use futures::StreamExt;

pub use vapid::{VapidCredentials, generate_vapid_credentials};
pub(crate) use vapid::{VapidConfigStatus, load_vapid_config};

/// Upper bound on simultaneous in-flight deliveries during a broadcast.
const MAX_IN_FLIGHT: usize = 8;

#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct BroadcastOutcome {
    pub(crate) attempted: usize,
    pub(crate) delivered: usize,
    pub(crate) pruned: usize,
}

/// Sends `payload` to every stored subscription and waits for all attempts
/// to settle. Failures never abort the broadcast: endpoints the push
/// service reports as gone are pruned from the store, everything else is
/// logged and left in place.
pub(crate) async fn broadcast_with_sender<S: PushSender>(
    sender: &S,
    store: &SubscriptionStore,
    payload: &str,
) -> BroadcastOutcome {
    let subscriptions = store.list();
    let mut outcome = BroadcastOutcome {
        attempted: subscriptions.len(),
        ..Default::default()
    };

    let results = futures::stream::iter(subscriptions)
        .map(|subscription| async move {
            let result = sender.send(&subscription, payload).await;
            (subscription, result)
        })
        .buffer_unordered(MAX_IN_FLIGHT)
        .collect::<Vec<_>>()
        .await;

    for (subscription, result) in results {
        match result {
            Ok(()) => outcome.delivered += 1,
            Err(err) if S::is_endpoint_gone(&err) => {
                eprintln!(
                    "push delivery error: endpoint gone, pruning {}",
                    subscription.endpoint
                );
                store.remove(&subscription.endpoint);
                outcome.pruned += 1;
            }
            Err(err) => {
                eprintln!("push delivery error: {} ({})", err, subscription.endpoint);
            }
        }
    }

    outcome
}
