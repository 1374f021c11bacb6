//! Application state types and the demo catalog shown before any on-chain
//! data exists.
//!
//! Catalog entries are plain display records consumed by the cards; they are
//! not session or ledger state.

use stardrift_session_core::AccountId;

/// Wallet header widget state
#[derive(Debug, Default)]
pub struct WalletState {
    pub is_connecting: bool,
    pub error: Option<String>,
    pub balance: Option<String>,
    pub balance_error: Option<String>,
    pub balance_loading: bool,
}

impl WalletState {
    pub fn clear_balance(&mut self) {
        self.balance = None;
        self.balance_error = None;
        self.balance_loading = false;
    }
}

/// Outcome line shown under the header after a game action is dispatched.
#[derive(Debug, Clone)]
pub enum ActionFeedback {
    Notice(String),
    Error(String),
}

/// Create-ship modal state
#[derive(Debug, Default)]
pub struct CreateShipState {
    pub open: bool,
    pub name: String,
    pub selected_type: String,
}

/// Create-trade modal state
#[derive(Debug)]
pub struct CreateTradeState {
    pub open: bool,
    pub sell_resource: String,
    pub sell_amount: String,
    pub buy_resource: String,
    pub buy_amount: String,
}

impl Default for CreateTradeState {
    fn default() -> Self {
        Self {
            open: false,
            sell_resource: String::new(),
            sell_amount: "0".to_owned(),
            buy_resource: String::new(),
            buy_amount: "0".to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShipEntry {
    pub name: String,
    pub ship_type: String,
    pub health: u32,
    pub cargo: u32,
    pub resources: Vec<(String, i64)>,
}

#[derive(Debug, Clone)]
pub struct StarSystemEntry {
    pub name: String,
    pub distance_ly: f64,
    pub discovered: bool,
    pub resources: Vec<(String, i64)>,
}

#[derive(Debug, Clone)]
pub struct MissionEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub reward_resource: String,
    pub reward_amount: i64,
    pub stars: u32,
    pub required_stars: u32,
    /// (resource, collected, required)
    pub resource_progress: Vec<(String, i64, i64)>,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct TradeOfferEntry {
    pub id: u32,
    pub seller: String,
    pub sell_resource: String,
    pub sell_amount: i64,
    pub buy_resource: String,
    pub buy_amount: i64,
}

pub fn demo_ships() -> Vec<ShipEntry> {
    vec![
        ShipEntry {
            name: "Explorer I".to_owned(),
            ship_type: "EXPLORER".to_owned(),
            health: 85,
            cargo: 750,
            resources: holdings(&[("ENERGY", 500), ("IRON", 200), ("WATER", 300)]),
        },
        ShipEntry {
            name: "Miner Alpha".to_owned(),
            ship_type: "MINER".to_owned(),
            health: 95,
            cargo: 900,
            resources: holdings(&[("ENERGY", 400), ("IRON", 600), ("WATER", 200)]),
        },
    ]
}

pub fn demo_star_systems() -> Vec<StarSystemEntry> {
    vec![
        StarSystemEntry {
            name: "Alpha Centauri".to_owned(),
            distance_ly: 4.37,
            discovered: true,
            resources: holdings(&[("ENERGY", 1000), ("IRON", 500), ("WATER", 800)]),
        },
        StarSystemEntry {
            name: "Proxima Centauri".to_owned(),
            distance_ly: 4.24,
            discovered: false,
            resources: holdings(&[("ENERGY", 1200), ("IRON", 600), ("WATER", 900)]),
        },
        StarSystemEntry {
            name: "Barnard's Star".to_owned(),
            distance_ly: 5.96,
            discovered: false,
            resources: holdings(&[("IRON", 400), ("ENERGY", 700)]),
        },
    ]
}

pub fn demo_missions() -> Vec<MissionEntry> {
    vec![
        MissionEntry {
            id: "FIRST_STEPS".to_owned(),
            name: "First Steps".to_owned(),
            description: "Discover your first star system".to_owned(),
            reward_resource: "ENERGY".to_owned(),
            reward_amount: 100,
            stars: 1,
            required_stars: 1,
            resource_progress: Vec::new(),
            completed: false,
        },
        MissionEntry {
            id: "RESOURCE_COLLECTOR".to_owned(),
            name: "Resource Collector".to_owned(),
            description: "Collect 1000 units of resources".to_owned(),
            reward_resource: "IRON".to_owned(),
            reward_amount: 500,
            stars: 1,
            required_stars: 1,
            resource_progress: vec![("WATER".to_owned(), 800, 1000)],
            completed: false,
        },
    ]
}

pub fn demo_trades() -> Vec<TradeOfferEntry> {
    vec![
        TradeOfferEntry {
            id: 1,
            seller: AccountId::from_key_bytes(&[0xa1; 32]).short(),
            sell_resource: "ENERGY".to_owned(),
            sell_amount: 500,
            buy_resource: "IRON".to_owned(),
            buy_amount: 200,
        },
        TradeOfferEntry {
            id: 2,
            seller: AccountId::from_key_bytes(&[0xb2; 32]).short(),
            sell_resource: "WATER".to_owned(),
            sell_amount: 300,
            buy_resource: "ENERGY".to_owned(),
            buy_amount: 400,
        },
    ]
}

fn holdings(entries: &[(&str, i64)]) -> Vec<(String, i64)> {
    entries
        .iter()
        .map(|(id, amount)| ((*id).to_owned(), *amount))
        .collect()
}
