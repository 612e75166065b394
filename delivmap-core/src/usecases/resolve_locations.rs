use super::prelude::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResolveSummary {
    pub resolved: usize,
    pub skipped: usize,
    pub unresolved: usize,
}

/// Resolves the location of every order that still needs one and persists
/// the table after each success.
///
/// Donations and orders with already populated coordinates are skipped
/// without touching the gateway, which makes reruns over a partially
/// resolved table cheap and idempotent.
pub fn resolve_order_locations<R, G, S>(
    repo: &R,
    geocoder: &G,
    policy: &RetryPolicy,
    sleep: &S,
) -> Result<ResolveSummary>
where
    R: OrderRepo,
    G: GeocodingGateway,
    S: Sleep,
{
    let mut orders = repo.load_orders()?;
    let mut summary = ResolveSummary::default();
    for ix in 0..orders.len() {
        let order = &orders[ix];
        if order.is_donation() {
            log::debug!("Skipping donation order {}", order.id);
            summary.skipped += 1;
            continue;
        }
        if let Some(pos) = order.location {
            log::debug!("Skipping order {} with known location {}", order.id, pos);
            summary.skipped += 1;
            continue;
        }
        let id = order.id.clone();
        let address = order.address.clone();
        match resolve_single_location(geocoder, policy, sleep, &address)? {
            Some(pos) => {
                orders[ix].location = Some(pos);
                repo.save_orders(&orders)?;
                log::info!("Resolved location of order {id}: {pos}");
                summary.resolved += 1;
            }
            None => {
                log::warn!("Failed to resolve location of order {id} ('{address}')");
                summary.unresolved += 1;
            }
        }
    }
    Ok(summary)
}

/// A single address lookup through the retry policy. Exhausted retries are
/// downgraded to "no result"; non-transient errors propagate.
fn resolve_single_location<G, S>(
    geocoder: &G,
    policy: &RetryPolicy,
    sleep: &S,
    addr: &Address,
) -> Result<Option<MapPoint>>
where
    G: GeocodingGateway,
    S: Sleep,
{
    let resolved = policy.run(sleep, GeocodeError::is_transient, || {
        geocoder.resolve_address_lat_lng(addr)
    });
    match resolved {
        Ok(Some((lat, lng))) => {
            let pos = MapPoint::try_from_lat_lng_deg(lat, lng);
            if pos.is_none() {
                log::warn!("Discarding out-of-range coordinates ({lat}, {lng}) for '{addr}'");
            }
            Ok(pos)
        }
        Ok(None) => Ok(None),
        Err(err) if err.is_transient() => Ok(None),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{repositories, util::retry::tests::FakeSleep};
    use anyhow::anyhow;
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        time::Duration,
    };

    #[derive(Default)]
    struct FakeRepo {
        orders: RefCell<Vec<Order>>,
        saves: Cell<usize>,
    }

    impl OrderRepo for FakeRepo {
        fn load_orders(&self) -> repositories::Result<Vec<Order>> {
            Ok(self.orders.borrow().clone())
        }

        fn save_orders(&self, orders: &[Order]) -> repositories::Result<()> {
            *self.orders.borrow_mut() = orders.to_vec();
            self.saves.set(self.saves.get() + 1);
            Ok(())
        }
    }

    type GeocodeResult = std::result::Result<Option<(f64, f64)>, GeocodeError>;

    #[derive(Default)]
    struct FakeGeocoder {
        responses: RefCell<VecDeque<GeocodeResult>>,
        calls: Cell<usize>,
    }

    impl FakeGeocoder {
        fn with_responses(responses: Vec<GeocodeResult>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: Cell::new(0),
            }
        }
    }

    impl GeocodingGateway for FakeGeocoder {
        fn resolve_address_lat_lng(&self, _: &Address) -> GeocodeResult {
            self.calls.set(self.calls.get() + 1);
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(GeocodeError::Unavailable))
        }
    }

    fn policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            backoff: |attempt| Duration::from_secs(1 << attempt),
        }
    }

    fn order(id: &str, item: &str, location: Option<MapPoint>) -> Order {
        Order {
            id: id.into(),
            address: Address {
                street: Some("350 5th Ave".into()),
                city: Some("New York".into()),
                state: Some("NY".into()),
                zip: Some("10118".into()),
            },
            item: item.into(),
            quantity: "3".into(),
            location,
        }
    }

    #[test]
    fn resolve_and_persist_after_each_success() {
        let repo = FakeRepo::default();
        repo.orders
            .borrow_mut()
            .extend([order("1", "Wreath", None), order("2", "Wreath", None)]);
        let geocoder = FakeGeocoder::with_responses(vec![
            Ok(Some((44.9, -93.5))),
            Ok(Some((44.8, -93.6))),
        ]);
        let sleep = FakeSleep::default();

        let summary = resolve_order_locations(&repo, &geocoder, &policy(), &sleep).unwrap();

        assert_eq!(2, summary.resolved);
        assert_eq!(2, repo.saves.get());
        assert!(sleep.delays.borrow().is_empty());
        assert!(repo.orders.borrow().iter().all(|o| o.location.is_some()));
    }

    #[test]
    fn fully_resolved_table_triggers_no_requests_and_no_saves() {
        let pos = MapPoint::try_from_lat_lng_deg(44.9, -93.5);
        let repo = FakeRepo::default();
        repo.orders
            .borrow_mut()
            .extend([order("1", "Wreath", pos), order("2", "Wreath", pos)]);
        let geocoder = FakeGeocoder::default();
        let sleep = FakeSleep::default();

        let summary = resolve_order_locations(&repo, &geocoder, &policy(), &sleep).unwrap();

        assert_eq!(0, geocoder.calls.get());
        assert_eq!(0, repo.saves.get());
        assert_eq!(2, summary.skipped);
    }

    #[test]
    fn donations_are_never_geocoded() {
        let repo = FakeRepo::default();
        repo.orders
            .borrow_mut()
            .push(order("1", "Cash Donation", None));
        let geocoder = FakeGeocoder::default();

        let summary =
            resolve_order_locations(&repo, &geocoder, &policy(), &FakeSleep::default()).unwrap();

        assert_eq!(0, geocoder.calls.get());
        assert_eq!(1, summary.skipped);
    }

    #[test]
    fn transient_failures_are_retried_with_growing_backoff() {
        let repo = FakeRepo::default();
        repo.orders.borrow_mut().push(order("1", "Wreath", None));
        let geocoder = FakeGeocoder::with_responses(vec![
            Err(GeocodeError::Timeout),
            Err(GeocodeError::Unavailable),
            Ok(Some((44.9, -93.5))),
        ]);
        let sleep = FakeSleep::default();

        let summary = resolve_order_locations(&repo, &geocoder, &policy(), &sleep).unwrap();

        assert_eq!(1, summary.resolved);
        assert_eq!(3, geocoder.calls.get());
        assert_eq!(
            vec![Duration::from_secs(1), Duration::from_secs(2)],
            *sleep.delays.borrow()
        );
    }

    #[test]
    fn exhausted_retries_become_no_result() {
        let repo = FakeRepo::default();
        repo.orders.borrow_mut().push(order("1", "Wreath", None));
        let geocoder = FakeGeocoder::default(); // always unavailable

        let summary =
            resolve_order_locations(&repo, &geocoder, &policy(), &FakeSleep::default()).unwrap();

        assert_eq!(1, summary.unresolved);
        assert_eq!(3, geocoder.calls.get());
        assert_eq!(0, repo.saves.get());
    }

    #[test]
    fn no_result_from_provider_is_not_retried() {
        let repo = FakeRepo::default();
        repo.orders.borrow_mut().push(order("1", "Wreath", None));
        let geocoder = FakeGeocoder::with_responses(vec![Ok(None)]);

        let summary =
            resolve_order_locations(&repo, &geocoder, &policy(), &FakeSleep::default()).unwrap();

        assert_eq!(1, summary.unresolved);
        assert_eq!(1, geocoder.calls.get());
    }

    #[test]
    fn non_transient_error_is_fatal() {
        let repo = FakeRepo::default();
        repo.orders.borrow_mut().push(order("1", "Wreath", None));
        let geocoder = FakeGeocoder::with_responses(vec![Err(GeocodeError::Other(anyhow!(
            "invalid response body"
        )))]);

        let res = resolve_order_locations(&repo, &geocoder, &policy(), &FakeSleep::default());

        assert!(res.is_err());
        assert_eq!(1, geocoder.calls.get());
    }
}
