//! Cost-benefit scoring of a cross-location offer.

use serde::{Deserialize, Serialize};

use crate::geo::{Coordinate, haversine_km};

/// Sub-score weights; together they bound the score to 0-100.
const ECONOMY_WEIGHT: f64 = 40.0;
const DISTANCE_WEIGHT: f64 = 30.0;
const TIME_WEIGHT: f64 = 20.0;
const AVAILABILITY_WEIGHT: f64 = 10.0;

/// Distances at or beyond this contribute nothing to the score.
const DISTANCE_CEILING_KM: f64 = 5.0;

/// Travel times at or beyond this contribute nothing to the score.
const TIME_CEILING_MIN: f64 = 15.0;

/// Tuning parameters for the travel model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelParams {
    pub average_speed_kmh: f64,
    /// Travel cost per kilometer, in currency units.
    pub cost_per_km: f64,
}

impl Default for TravelParams {
    fn default() -> Self {
        Self {
            average_speed_kmh: 30.0,
            cost_per_km: 0.50,
        }
    }
}

/// A cross-location offer to evaluate against the price at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DealRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    /// Price the buyer would pay without traveling.
    pub current_price: f64,
    /// Price of the offer at the destination.
    pub offer_price: f64,
    pub in_stock: bool,
}

/// Recommendation bucket derived from the score.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealCategory {
    Excellent,
    Good,
    Fair,
    NotRecommended,
}

impl DealCategory {
    fn from_score(score: u8) -> Self {
        match score {
            80.. => DealCategory::Excellent,
            60..=79 => DealCategory::Good,
            40..=59 => DealCategory::Fair,
            _ => DealCategory::NotRecommended,
        }
    }
}

/// The computed cost-benefit verdict for one offer.
///
/// Produced on demand and never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealQuote {
    /// Great-circle distance to the offer, 1 decimal.
    pub distance_km: f64,
    pub travel_time_min: i64,
    /// Estimated cost of the trip, 2 decimals.
    pub travel_cost: f64,
    /// Gross price difference (current minus offer).
    pub savings: f64,
    /// Savings net of travel cost, 2 decimals.
    pub net_savings: f64,
    /// 0-100 weighted cost-benefit score.
    pub score: u8,
    pub category: DealCategory,
    /// Human-readable justification for the category.
    pub rationale: String,
}

/// Score an offer: haversine distance, travel time/cost, and a weighted sum
/// of four independently-capped sub-scores (economy 40, distance 30, time 20,
/// availability 10).
pub fn score_deal(request: &DealRequest, params: &TravelParams) -> DealQuote {
    let distance_km = round1(haversine_km(request.origin, request.destination));
    let travel_time_min = (distance_km / params.average_speed_kmh * 60.0).round() as i64;
    let travel_cost = round2(distance_km * params.cost_per_km);
    let savings = request.current_price - request.offer_price;
    let net_savings = round2(savings - travel_cost);

    let economy = if request.current_price > 0.0 {
        (savings / request.current_price * ECONOMY_WEIGHT * 100.0).clamp(0.0, ECONOMY_WEIGHT)
    } else {
        0.0
    };
    let proximity =
        ((DISTANCE_CEILING_KM - distance_km) / DISTANCE_CEILING_KM).max(0.0) * DISTANCE_WEIGHT;
    let quickness =
        ((TIME_CEILING_MIN - travel_time_min as f64) / TIME_CEILING_MIN).max(0.0) * TIME_WEIGHT;
    let availability = if request.in_stock {
        AVAILABILITY_WEIGHT
    } else {
        0.0
    };

    let score = (economy + proximity + quickness + availability).round() as u8;
    let category = DealCategory::from_score(score);
    let rationale = rationale(category, distance_km, savings, travel_cost, net_savings);

    DealQuote {
        distance_km,
        travel_time_min,
        travel_cost,
        savings,
        net_savings,
        score,
        category,
        rationale,
    }
}

fn rationale(
    category: DealCategory,
    distance_km: f64,
    savings: f64,
    travel_cost: f64,
    net_savings: f64,
) -> String {
    match category {
        DealCategory::Excellent => format!(
            "Excellent deal: {net_savings:.2} net savings just {distance_km:.1} km away."
        ),
        DealCategory::Good => format!(
            "Good deal: {net_savings:.2} left after {travel_cost:.2} in travel costs."
        ),
        DealCategory::Fair if distance_km > 3.0 => format!(
            "Fair deal: the {distance_km:.1} km trip eats into the savings; worth it only if you are already nearby."
        ),
        DealCategory::Fair => "Fair deal: modest savings for the trip required.".to_string(),
        DealCategory::NotRecommended if savings < travel_cost => format!(
            "Not worth the trip: travel costs ({travel_cost:.2}) exceed the savings ({savings:.2})."
        ),
        DealCategory::NotRecommended => {
            "Not worth the trip: the savings do not justify the distance and time.".to_string()
        }
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
