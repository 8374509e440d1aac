use argus_core::AppResult;
use argus_transport::event::{EventPhase, NormalizedEvent};
use chrono::Utc;
use tracing::warn;

use crate::identity::IdentityResolver;
use crate::presence::{PresenceCoordinator, ReconciliationSweep};

/// Applies normalized transport lifecycle events to presence state.
///
/// Connects and disconnects also trigger a reconciliation pass, since
/// lifecycle churn is exactly when the store and the registry drift.
/// The pass is best-effort; the event's own transition is already
/// settled when it runs.
#[derive(Debug, Clone)]
pub struct ConnectionEventHandler {
    resolver: IdentityResolver,
    coordinator: PresenceCoordinator,
    reconciler: ReconciliationSweep,
}

impl ConnectionEventHandler {
    pub fn new(
        resolver: IdentityResolver,
        coordinator: PresenceCoordinator,
        reconciler: ReconciliationSweep,
    ) -> Self {
        Self {
            resolver,
            coordinator,
            reconciler,
        }
    }

    /// Apply one lifecycle event.
    ///
    /// Unknown phases are logged and ignored. Errors surface to the
    /// webhook layer, which acknowledges them without failing the
    /// delivery.
    pub async fn handle(&self, event: &NormalizedEvent) -> AppResult<()> {
        match event.phase {
            EventPhase::Unknown => {
                warn!(
                    identity = %event.identity,
                    label = %event.label,
                    "Ignoring unrecognized connection event"
                );
                Ok(())
            }
            EventPhase::Custom => {
                let user = self.resolver.resolve(&event.identity).await?;
                self.coordinator.touch(user.id, Utc::now()).await
            }
            EventPhase::Connect => {
                let user = self.resolver.resolve(&event.identity).await?;
                self.coordinator.set_online(&user, Utc::now()).await?;
                self.sweep_after_lifecycle().await;
                Ok(())
            }
            EventPhase::Disconnected => {
                let user = self.resolver.resolve(&event.identity).await?;
                self.coordinator.set_offline(&user, Utc::now()).await?;
                self.sweep_after_lifecycle().await;
                Ok(())
            }
        }
    }

    async fn sweep_after_lifecycle(&self) {
        if let Err(e) = self.reconciler.run().await {
            warn!(error = %e, "Reconciliation after lifecycle event failed");
        }
    }
}
