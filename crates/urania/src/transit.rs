//! Comparing slow bodies at the two ends of a forecast window.
//!
//! Only the endpoints are sampled. A body that leaves a sign and returns
//! within the window reports no change.

use serde::{Deserialize, Serialize};

use crate::angle::{circular_distance, normalize};
use crate::error::{ensure_finite, ChartError, Result};
use crate::placement::BodyPosition;
use crate::zodiac::{Body, Sign};

/// Which end of the window put the transiting body within orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactEndpoint {
    Start,
    End,
    Both,
}

/// A transiting body within orb of a natal position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalContact {
    pub natal: Body,
    pub endpoint: ContactEndpoint,
    /// Smallest separation among the triggering endpoints
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitEvent {
    pub body: Body,
    pub start_longitude: f64,
    pub end_longitude: f64,
    pub start_sign: Sign,
    pub end_sign: Sign,
    pub contacts: Vec<NatalContact>,
}

impl TransitEvent {
    pub fn sign_changed(&self) -> bool {
        self.start_sign != self.end_sign
    }
}

#[derive(Debug, Clone)]
pub struct TransitComparator {
    contact_orb: f64,
}

impl Default for TransitComparator {
    fn default() -> Self {
        Self { contact_orb: 4.0 }
    }
}

impl TransitComparator {
    pub fn new(contact_orb: f64) -> Result<Self> {
        ensure_finite("contact orb", contact_orb)?;
        if contact_orb < 0.0 {
            return Err(ChartError::invalid(
                "contact orb",
                contact_orb,
                "must not be negative",
            ));
        }
        Ok(Self { contact_orb })
    }

    pub fn contact_orb(&self) -> f64 {
        self.contact_orb
    }

    /// One event per transiting body, longitudes supplied by the callbacks.
    ///
    /// The first failing lookup aborts the comparison.
    pub fn compare<S, E>(
        &self,
        transiting: &[Body],
        natal: &[BodyPosition],
        mut start_longitude: S,
        mut end_longitude: E,
    ) -> Result<Vec<TransitEvent>>
    where
        S: FnMut(Body) -> Result<f64>,
        E: FnMut(Body) -> Result<f64>,
    {
        transiting
            .iter()
            .map(|&body| {
                let start = start_longitude(body)?;
                let end = end_longitude(body)?;
                self.event(body, start, end, natal)
            })
            .collect()
    }

    /// Event for one body given its endpoint longitudes.
    pub fn event(
        &self,
        body: Body,
        start_longitude: f64,
        end_longitude: f64,
        natal: &[BodyPosition],
    ) -> Result<TransitEvent> {
        let start = normalize(ensure_finite("start longitude", start_longitude)?);
        let end = normalize(ensure_finite("end longitude", end_longitude)?);

        let event = TransitEvent {
            body,
            start_longitude: start,
            end_longitude: end,
            start_sign: Sign::from_longitude(start),
            end_sign: Sign::from_longitude(end),
            contacts: self.contacts(start, end, natal),
        };

        if event.sign_changed() {
            log::debug!(
                "{} changes sign: {} -> {}",
                body,
                event.start_sign,
                event.end_sign
            );
        }
        Ok(event)
    }

    fn contacts(&self, start: f64, end: f64, natal: &[BodyPosition]) -> Vec<NatalContact> {
        let mut contacts: Vec<NatalContact> = Vec::new();
        for position in natal {
            let at_start = circular_distance(start, position.longitude);
            let at_end = circular_distance(end, position.longitude);
            let hit_start = at_start <= self.contact_orb;
            let hit_end = at_end <= self.contact_orb;

            let (endpoint, distance) = match (hit_start, hit_end) {
                (true, true) => (ContactEndpoint::Both, at_start.min(at_end)),
                (true, false) => (ContactEndpoint::Start, at_start),
                (false, true) => (ContactEndpoint::End, at_end),
                (false, false) => continue,
            };

            // Same natal body listed twice still yields one contact
            match contacts.iter_mut().find(|c| c.natal == position.body) {
                Some(existing) => {
                    existing.endpoint = merge(existing.endpoint, endpoint);
                    existing.distance = existing.distance.min(distance);
                }
                None => contacts.push(NatalContact {
                    natal: position.body,
                    endpoint,
                    distance,
                }),
            }
        }
        contacts
    }
}

fn merge(a: ContactEndpoint, b: ContactEndpoint) -> ContactEndpoint {
    if a == b {
        a
    } else {
        ContactEndpoint::Both
    }
}
