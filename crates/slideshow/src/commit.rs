//! Render-stage-commit steps shared by both schedulers.

use core::time::Duration;

use platform::{DisplayGateway, FrameOptions, GatewayResponse, Renderer};

use crate::error::SchedulerError;

/// What the scheduler does after a commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Commit {
    /// Frame is on the panel.
    Done,
    /// Panel refused; wait at least this long before trying again.
    Retry(Duration),
}

/// Render `content` and stage the frame on the gateway.
pub(crate) async fn stage<C, R, G>(
    renderer: &mut R,
    gateway: &mut G,
    content: &C,
    options: FrameOptions,
) -> Result<(), SchedulerError>
where
    R: Renderer<C>,
    G: DisplayGateway,
{
    let frame = renderer.render(content).await.map_err(|err| {
        tracing::error!(error = %err, "render failed");
        SchedulerError::render(err)
    })?;
    gateway.set_frame(frame, options);
    Ok(())
}

/// Push the staged frame and classify the gateway's answer.
pub(crate) async fn commit<G: DisplayGateway>(gateway: &mut G) -> Result<Commit, SchedulerError> {
    match gateway.commit().await {
        GatewayResponse::Committed => {
            tracing::info!("frame committed");
            Ok(Commit::Done)
        }
        GatewayResponse::NotReady(wait) => {
            tracing::info!(wait_secs = wait.as_secs_f64(), "display not ready, waiting");
            Ok(Commit::Retry(wait))
        }
        GatewayResponse::Error(reason) => {
            tracing::error!(%reason, "display gateway failed");
            Err(SchedulerError::Gateway(reason))
        }
    }
}
