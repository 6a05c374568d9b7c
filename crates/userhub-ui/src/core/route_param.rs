//! Requests keyed by a route parameter (profile id, activation token).
//!
//! # Design
//! - Every new parameter value issues a ticket with a higher sequence number.
//! - Only the latest ticket may settle; late responses for old values are dropped.
//! - [`follow`] additionally drops the in-flight future of a superseded value.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;

use futures_util::future::{Either, select};
use futures_util::stream::{Stream, StreamExt};
use userhub_client::ApiError;

use crate::core::request::{RequestState, Ticket};

/// Request state bound to the currently observed route parameter.
#[derive(Debug)]
pub struct RouteParamRequest<P, T> {
    observed: Option<P>,
    seq: u64,
    state: RequestState<T>,
}

impl<P, T> Default for RouteParamRequest<P, T> {
    fn default() -> Self {
        Self {
            observed: None,
            seq: 0,
            state: RequestState::Idle,
        }
    }
}

impl<P: Clone + PartialEq, T> RouteParamRequest<P, T> {
    /// Controller that has not observed any parameter yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observe `param`; issues a ticket unless the same value is already observed.
    pub fn begin(&mut self, param: P) -> Option<Ticket<P>> {
        if self.observed.as_ref() == Some(&param) {
            return None;
        }
        Some(self.restart(param))
    }

    /// Issue a ticket for `param` even when it is already observed.
    pub fn restart(&mut self, param: P) -> Ticket<P> {
        self.seq += 1;
        self.observed = Some(param.clone());
        self.state = RequestState::Loading;
        Ticket::new(self.seq, param)
    }

    /// Apply a finished call; returns `false` when the ticket was superseded.
    pub fn settle(&mut self, ticket: &Ticket<P>, result: Result<T, ApiError>) -> bool {
        if ticket.seq() != self.seq {
            tracing::debug!(
                ticket = ticket.seq(),
                latest = self.seq,
                "discarding superseded route request"
            );
            return false;
        }
        self.state = RequestState::from_result(result);
        true
    }

    /// Current request state.
    #[must_use]
    pub const fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// Mutable access to the loaded payload (after a local edit).
    pub const fn data_mut(&mut self) -> Option<&mut T> {
        self.state.data_mut()
    }

    /// Observe `param` on a shared controller and run its request.
    ///
    /// `notify` runs after each applied transition. Returns `false` when the
    /// value was already observed or the response arrived for a superseded value.
    pub async fn load_with<F, Fut, N>(cell: &RefCell<Self>, param: P, fetch: F, notify: N) -> bool
    where
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
        N: Fn(),
    {
        let Some(ticket) = cell.borrow_mut().begin(param) else {
            return false;
        };
        notify();
        let result = fetch(ticket.param().clone()).await;
        let applied = cell.borrow_mut().settle(&ticket, result);
        if applied {
            notify();
        }
        applied
    }
}

enum Step<P, T> {
    Param(P),
    ParamsEnded,
    Settled(Result<T, ApiError>),
}

/// Drive a controller from a stream of parameter values.
///
/// `on_change` sees every state transition. A new value cancels the request for
/// the previous one by dropping its future. Returns once the stream has ended
/// and the last request has settled.
pub async fn follow<P, T, S, F, Fut, C>(
    params: S,
    mut fetch: F,
    mut on_change: C,
) -> RouteParamRequest<P, T>
where
    P: Clone + PartialEq,
    S: Stream<Item = P> + Unpin,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
    C: FnMut(&RequestState<T>),
{
    let mut controller = RouteParamRequest::new();
    let mut params = params.fuse();
    let mut params_open = true;
    let mut in_flight: Option<(Ticket<P>, Pin<Box<Fut>>)> = None;

    loop {
        let step = match in_flight.as_mut() {
            Some((_, request)) if params_open => {
                match select(params.next(), request.as_mut()).await {
                    Either::Left((Some(param), _)) => Step::Param(param),
                    Either::Left((None, _)) => Step::ParamsEnded,
                    Either::Right((result, _)) => Step::Settled(result),
                }
            }
            Some((_, request)) => Step::Settled(request.as_mut().await),
            None if params_open => match params.next().await {
                Some(param) => Step::Param(param),
                None => Step::ParamsEnded,
            },
            None => break,
        };

        match step {
            Step::Param(param) => {
                if let Some(ticket) = controller.begin(param) {
                    let request = Box::pin(fetch(ticket.param().clone()));
                    in_flight = Some((ticket, request));
                    on_change(controller.state());
                }
            }
            Step::ParamsEnded => params_open = false,
            Step::Settled(result) => {
                if let Some((ticket, _)) = in_flight.take()
                    && controller.settle(&ticket, result)
                {
                    on_change(controller.state());
                }
            }
        }
    }

    controller
}

#[cfg(test)]
mod tests {
    use futures_util::stream;
    use userhub_client::models::ErrorBody;

    use super::*;

    #[test]
    fn same_value_is_a_no_op() {
        let mut controller: RouteParamRequest<String, u8> = RouteParamRequest::new();
        assert!(controller.begin("1".to_string()).is_some());
        assert!(controller.begin("1".to_string()).is_none());
        assert!(controller.state().is_loading());
    }

    #[test]
    fn stale_ticket_cannot_overwrite_newer_value() {
        let mut controller: RouteParamRequest<String, &str> = RouteParamRequest::new();
        let first = controller.begin("1".to_string());
        let second = controller.begin("2".to_string());
        let (Some(first), Some(second)) = (first, second) else {
            panic!("both values should issue tickets");
        };

        assert!(controller.settle(&second, Ok("user2")));
        assert!(!controller.settle(&first, Ok("user1")));
        assert_eq!(controller.state().data(), Some(&"user2"));
    }

    #[test]
    fn restart_reloads_current_value() {
        let mut controller: RouteParamRequest<String, u8> = RouteParamRequest::new();
        let ticket = controller.restart("5".to_string());
        assert!(controller.settle(&ticket, Ok(5)));
        let again = controller.restart("5".to_string());
        assert!(controller.state().is_loading());
        assert!(controller.settle(
            &again,
            Err(ApiError::from_status(404, ErrorBody::default()))
        ));
        assert!(controller.state().error().is_some());
    }

    #[tokio::test]
    async fn follow_cancels_superseded_requests() {
        let fetched = RefCell::new(Vec::new());
        let seen = RefCell::new(Vec::new());

        let mut controller = follow(
            stream::iter(vec!["1".to_string(), "2".to_string(), "2".to_string()]),
            |param: String| {
                fetched.borrow_mut().push(param.clone());
                async move { Ok::<_, ApiError>(format!("user{param}")) }
            },
            |state: &RequestState<String>| {
                seen.borrow_mut().push(state.clone());
            },
        )
        .await;

        assert_eq!(*fetched.borrow(), vec!["1".to_string(), "2".to_string()]);
        assert_eq!(
            *seen.borrow(),
            vec![
                RequestState::Loading,
                RequestState::Loading,
                RequestState::Success("user2".to_string()),
            ]
        );
        assert!(controller.begin("2".to_string()).is_none());
    }
}
