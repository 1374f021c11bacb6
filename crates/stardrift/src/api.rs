//! Horizon account API client backing the balance readout in the header.

use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct HorizonAccount {
    pub balances: Vec<HorizonBalance>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HorizonBalance {
    pub balance: String,
    pub asset_type: String,
}

/// Fetch an account's native-asset balance, in lumens.
pub async fn fetch_native_balance(horizon_url: &str, account: &str) -> Result<String> {
    let url = format!("{}/accounts/{}", horizon_url.trim_end_matches('/'), account);
    let response = reqwest::get(&url).await.wrap_err("horizon request failed")?;
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(eyre!("account is not funded on this network"));
    }
    if !response.status().is_success() {
        return Err(eyre!("horizon returned status {}", response.status()));
    }
    let account: HorizonAccount = response
        .json()
        .await
        .wrap_err("horizon json decode failed")?;
    native_balance(&account).ok_or_else(|| eyre!("account has no native balance entry"))
}

fn native_balance(account: &HorizonAccount) -> Option<String> {
    account
        .balances
        .iter()
        .find(|b| b.asset_type == "native")
        .map(|b| b.balance.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_balance_is_picked_out_of_the_account_record() {
        let account: HorizonAccount = serde_json::from_str(
            r#"{
                "balances": [
                    {"balance": "42.0000000", "asset_type": "credit_alphanum4", "asset_code": "USDC"},
                    {"balance": "1000.5000000", "asset_type": "native"}
                ]
            }"#,
        )
        .expect("account json");
        assert_eq!(native_balance(&account).as_deref(), Some("1000.5000000"));
    }

    #[test]
    fn account_without_native_entry_yields_none() {
        let account = HorizonAccount { balances: vec![] };
        assert_eq!(native_balance(&account), None);
    }
}
