//! Centralized balance and tuning constants for the trail simulation.
//!
//! Starting supplies and trip length live in [`crate::config::TrailConfig`];
//! the values here shape event odds and damage rolls and are only adjusted
//! through code review.

// Random event bands (cumulative upper bounds) -----------------------------
pub(crate) const EVENT_SICKNESS_BAND: f64 = 0.08;
pub(crate) const EVENT_WAGON_BREAK_BAND: f64 = 0.14;
pub(crate) const EVENT_RIVER_BAND: f64 = 0.18;
pub(crate) const EVENT_THIEVES_BAND: f64 = 0.22;
pub(crate) const EVENT_BOUNTY_BAND: f64 = 0.26;

// Sickness -----------------------------------------------------------------
pub(crate) const ILLNESSES: [&str; 4] = ["typhoid", "cholera", "fever", "dysentery"];
pub(crate) const SICKNESS_DAMAGE_MIN: u32 = 10;
pub(crate) const SICKNESS_DAMAGE_MAX: u32 = 40;

// Wagon breakdowns ---------------------------------------------------------
pub(crate) const WHEEL_REPAIR_DAYS: u32 = 1;
pub(crate) const WHEEL_REPAIR_INJURY_CHANCE: f64 = 0.20;
pub(crate) const WHEEL_REPAIR_DAMAGE_MIN: u32 = 1;
pub(crate) const WHEEL_REPAIR_DAMAGE_MAX: u32 = 8;
pub(crate) const AXLE_REPAIR_DAYS: u32 = 2;
pub(crate) const AXLE_STRANDED_FOOD_LOSS: u32 = 20;
pub(crate) const TONGUE_REPAIR_DAYS: u32 = 1;

// River crossings ----------------------------------------------------------
pub(crate) const RIVER_WIDTH_MIN_FT: u32 = 50;
pub(crate) const RIVER_WIDTH_MAX_FT: u32 = 400;
pub(crate) const FORD_MAX_RISK: f64 = 0.6;
pub(crate) const FORD_FOOD_RISK_SCALE: f64 = 1000.0;
pub(crate) const FORD_FOOD_LOSS_MIN: u32 = 20;
pub(crate) const FORD_FOOD_LOSS_MAX: u32 = 80;
pub(crate) const FORD_DROWNING_CHANCE: f64 = 0.20;
pub(crate) const FLOAT_COST_MIN: u32 = 10;
pub(crate) const FLOAT_COST_MAX: u32 = 30;
pub(crate) const FLOAT_STRUGGLE_CHANCE: f64 = 0.50;
pub(crate) const FLOAT_STRUGGLE_DAMAGE_MIN: u32 = 5;
pub(crate) const FLOAT_STRUGGLE_DAMAGE_MAX: u32 = 30;
pub(crate) const FERRY_COST_MIN: u32 = 20;
pub(crate) const FERRY_COST_MAX: u32 = 60;
pub(crate) const FERRY_MAX_RETRIES: u32 = 3;

// Thieves and bounty -------------------------------------------------------
pub(crate) const THIEF_CASH_MIN: u32 = 10;
pub(crate) const THIEF_CASH_MAX: u32 = 60;
pub(crate) const THIEF_FOOD_MIN: u32 = 10;
pub(crate) const THIEF_FOOD_MAX: u32 = 100;
pub(crate) const BOUNTY_CASH_MIN: u32 = 10;
pub(crate) const BOUNTY_CASH_MAX: u32 = 60;

// Trail hazards (travel and fording) ---------------------------------------
pub(crate) const TRAIL_HAZARD_CHANCE: f64 = 0.12;
pub(crate) const TRAIL_HAZARD_DAMAGE_MIN: u32 = 0;
pub(crate) const TRAIL_HAZARD_DAMAGE_MAX: u32 = 6;

// Rest ---------------------------------------------------------------------
pub(crate) const REST_HEAL_MIN: u32 = 8;
pub(crate) const REST_HEAL_MAX: u32 = 20;
pub(crate) const REST_FLAVOR_CHANCE: f64 = 0.10;

// Hunting ------------------------------------------------------------------
pub(crate) const HUNT_SHOTS_MIN: u32 = 5;
pub(crate) const HUNT_SHOTS_MAX: u32 = 20;
pub(crate) const HUNT_BASE_SUCCESS: f64 = 0.4;
pub(crate) const HUNT_SUCCESS_PER_ROUND: f64 = 0.01;
pub(crate) const HUNT_ACCIDENT_CHANCE: f64 = 0.05;
pub(crate) const HUNT_ACCIDENT_DAMAGE_MIN: u32 = 2;
pub(crate) const HUNT_ACCIDENT_DAMAGE_MAX: u32 = 18;

// Trading post prices ------------------------------------------------------
pub(crate) const TRADE_FOOD_PRICE_MIN: u32 = 5;
pub(crate) const TRADE_FOOD_PRICE_MAX: u32 = 15;
pub(crate) const TRADE_AMMO_PRICE_MIN: u32 = 2;
pub(crate) const TRADE_AMMO_PRICE_MAX: u32 = 5;
pub(crate) const TRADE_WHEEL_PRICE_MIN: u32 = 30;
pub(crate) const TRADE_WHEEL_PRICE_MAX: u32 = 80;

// Failure check ------------------------------------------------------------
pub(crate) const DESTITUTE_HEALTH_THRESHOLD: u32 = 30;
