use serde::{Deserialize, Serialize};

/// Static game metadata shared by the shell's tabs and modals. Built once at
/// the composition root and passed down by reference; nothing mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub network: NetworkConfig,
    pub contracts: ContractEndpoints,
    pub ship_types: Vec<ShipType>,
    pub resources: Vec<ResourceKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub horizon_url: String,
    pub network_passphrase: String,
}

/// Opaque endpoint identifiers for the four game contracts. Configuration
/// values only; nothing in this repository resolves or invokes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractEndpoints {
    pub space_game: String,
    pub star_system: String,
    pub missions: String,
    pub trading: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipType {
    pub id: String,
    pub name: String,
    pub cost: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceKind {
    pub id: String,
    pub name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                rpc_url: "https://soroban-testnet.stellar.org".to_owned(),
                horizon_url: "https://horizon-testnet.stellar.org".to_owned(),
                network_passphrase: "Test SDF Network ; September 2015".to_owned(),
            },
            contracts: ContractEndpoints {
                space_game: "space_game_contract_id".to_owned(),
                star_system: "star_system_contract_id".to_owned(),
                missions: "missions_contract_id".to_owned(),
                trading: "trading_contract_id".to_owned(),
            },
            ship_types: vec![
                ship_type("EXPLORER", "Explorer", 100),
                ship_type("MINER", "Miner", 200),
                ship_type("TRADER", "Trader", 300),
            ],
            resources: vec![
                resource("ENERGY", "Energy"),
                resource("IRON", "Iron"),
                resource("WATER", "Water"),
                resource("CRYSTAL", "Crystal"),
            ],
        }
    }
}

impl GameConfig {
    pub fn ship_type(&self, id: &str) -> Option<&ShipType> {
        self.ship_types.iter().find(|t| t.id == id)
    }

    pub fn resource(&self, id: &str) -> Option<&ResourceKind> {
        self.resources.iter().find(|r| r.id == id)
    }
}

fn ship_type(id: &str, name: &str, cost: i64) -> ShipType {
    ShipType {
        id: id.to_owned(),
        name: name.to_owned(),
        cost,
    }
}

fn resource(id: &str, name: &str) -> ResourceKind {
    ResourceKind {
        id: id.to_owned(),
        name: name.to_owned(),
    }
}
