//! API version negotiation
//!
//! Candidates are tried strictly in list order and the first one that yields
//! both a window and a context wins. List order is the only priority
//! mechanism. When every candidate fails, all constraints are cleared and one
//! last unconstrained attempt is made.

use super::error::{ContextError, ContextResult};
use super::target::VersionCandidate;
use super::window::{WindowParams, WindowSystem};

/// A window with a live context and the request that produced it
pub struct Negotiated<Win, Ctx> {
    /// The window (still hidden)
    pub window: Win,
    /// The context created for it
    pub context: Ctx,
    /// The winning request; unconstrained when the fallback succeeded
    pub version: VersionCandidate,
    /// Per-candidate failures seen before the winner, in order
    pub failures: Vec<ContextError>,
}

/// Negotiate a context
///
/// Every window is created hidden regardless of `params`; the caller shows
/// the winner once negotiation is over.
pub fn negotiate<W: WindowSystem>(
    window_system: &mut W,
    candidates: &[VersionCandidate],
    params: &WindowParams,
) -> ContextResult<Negotiated<W::Window, W::Context>> {
    let params = params.hidden();
    let mut failures = Vec::new();

    for candidate in candidates {
        window_system.set_context_request(candidate);
        match attempt(window_system, candidate, &params) {
            Ok((window, context)) => {
                log::info!("created {candidate} context");
                return Ok(Negotiated {
                    window,
                    context,
                    version: *candidate,
                    failures,
                });
            }
            Err(err) => {
                log::warn!("{err}");
                failures.push(err);
            }
        }
    }

    log::warn!("no requested GL version available, letting the platform choose");
    window_system.clear_context_request();
    let fallback = VersionCandidate::unconstrained();
    match attempt(window_system, &fallback, &params) {
        Ok((window, context)) => {
            log::info!("created {fallback} context");
            Ok(Negotiated {
                window,
                context,
                version: fallback,
                failures,
            })
        }
        Err(err) => {
            log::error!("{err}");
            Err(ContextError::TotalNegotiationFailure {
                attempts: candidates.len() + 1,
                last_error: err.to_string(),
            })
        }
    }
}

/// One window + context attempt
///
/// A window whose context failed is destroyed, since the requested profile
/// cannot change after window creation on some platforms.
fn attempt<W: WindowSystem>(
    window_system: &mut W,
    candidate: &VersionCandidate,
    params: &WindowParams,
) -> ContextResult<(W::Window, W::Context)> {
    let mut window = window_system
        .create_window(params)
        .map_err(|e| ContextError::WindowCreationFailed {
            version: *candidate,
            reason: e.to_string(),
        })?;

    match window_system.create_context(&mut window) {
        Ok(context) => Ok((window, context)),
        Err(e) => {
            window_system.destroy_window(window);
            Err(ContextError::ContextCreationFailed {
                version: *candidate,
                reason: e.to_string(),
            })
        }
    }
}
