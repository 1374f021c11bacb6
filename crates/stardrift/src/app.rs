//! Main application state and update loop

use eframe::egui;
use std::sync::{Arc, Mutex};

use stardrift_session_core::{command_kind, AccountId, GameCommand, SessionError, SessionStatus};

use crate::session_bridge::SessionBridge;
use crate::state::{
    demo_missions, demo_ships, demo_star_systems, demo_trades, ActionFeedback, CreateShipState,
    CreateTradeState, MissionEntry, ShipEntry, StarSystemEntry, TradeOfferEntry, WalletState,
};
use crate::ui;

/// Result from the background wallet connect
#[derive(Clone)]
pub enum ConnectResult {
    Success(AccountId),
    Error(String),
}

/// Result from the background Horizon balance fetch
#[derive(Clone)]
pub enum BalanceResult {
    Success(String),
    Error(String),
}

/// The main application state
pub struct App {
    /// Current active tab
    active_tab: Tab,
    /// Shell-facing session boundary
    bridge: SessionBridge,
    /// Wallet header widget state
    wallet: WalletState,
    /// Demo catalog shown until on-chain data exists
    ships: Vec<ShipEntry>,
    stars: Vec<StarSystemEntry>,
    missions: Vec<MissionEntry>,
    trades: Vec<TradeOfferEntry>,
    /// Modal state
    create_ship: CreateShipState,
    create_trade: CreateTradeState,
    /// Outcome of the last dispatched action
    feedback: Option<ActionFeedback>,
    /// Async connect result receiver
    connect_result: Arc<Mutex<Option<ConnectResult>>>,
    /// Async balance fetch result receiver
    balance_result: Arc<Mutex<Option<BalanceResult>>>,
}

/// Available tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Ships,
    StarSystems,
    Missions,
    Trading,
}

impl App {
    /// Create a new App instance
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            active_tab: Tab::default(),
            bridge: SessionBridge::default(),
            wallet: WalletState::default(),
            ships: demo_ships(),
            stars: demo_star_systems(),
            missions: demo_missions(),
            trades: demo_trades(),
            create_ship: CreateShipState::default(),
            create_trade: CreateTradeState::default(),
            feedback: None,
            connect_result: Arc::new(Mutex::new(None)),
            balance_result: Arc::new(Mutex::new(None)),
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Check for async connect results
        self.check_connect_result(ctx);

        // Check for async balance results
        self.check_balance_result();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("🚀 StarDrift").size(22.0).color(ui::ACCENT));
                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);
                ui.selectable_value(&mut self.active_tab, Tab::Ships, "🛠 Ships");
                ui.selectable_value(&mut self.active_tab, Tab::StarSystems, "✨ Star Systems");
                ui.selectable_value(&mut self.active_tab, Tab::Missions, "📋 Missions");
                ui.selectable_value(&mut self.active_tab, Tab::Trading, "💱 Trading");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    self.render_wallet_widget(ui, ctx);
                });
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(10.0);
                self.render_feedback(ui);
                match self.active_tab {
                    Tab::Ships => self.render_ships_tab(ui),
                    Tab::StarSystems => self.render_star_systems_tab(ui),
                    Tab::Missions => self.render_missions_tab(ui),
                    Tab::Trading => self.render_trading_tab(ui),
                }
                ui.add_space(20.0);
            });
        });

        if self.create_ship.open {
            self.render_create_ship_modal(ctx);
        }
        if self.create_trade.open {
            self.render_create_trade_modal(ctx);
        }
    }
}

impl App {
    fn render_wallet_widget(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let session = match self.bridge.session() {
            Ok(session) => session,
            Err(e) => {
                ui::error_message(ui, &e.to_string());
                return;
            }
        };

        match session.status {
            SessionStatus::Connected => {
                let Some(address) = session.address else {
                    return;
                };
                if ui.button("Disconnect").clicked() {
                    self.disconnect();
                    return;
                }
                if ui
                    .small_button("📋")
                    .on_hover_text("Copy address")
                    .clicked()
                {
                    ui::copy_to_clipboard(address.as_str());
                }
                ui.label(
                    egui::RichText::new(address.short())
                        .monospace()
                        .color(ui::ACCENT),
                )
                .on_hover_text(address.as_str());

                if self.wallet.balance_loading {
                    ui.spinner();
                } else if let Some(ref balance) = self.wallet.balance {
                    ui.label(format!("{balance} XLM"));
                } else if let Some(ref error) = self.wallet.balance_error {
                    ui.label(egui::RichText::new("— XLM").weak())
                        .on_hover_text(error);
                }
            }
            SessionStatus::Connecting => {
                ui.add_enabled(false, egui::Button::new("Connecting…"));
                ui.spinner();
            }
            SessionStatus::Disconnected | SessionStatus::Failed => {
                if ui.button("Connect Wallet").clicked() {
                    self.trigger_connect(ctx);
                }
                if let Some(ref error) = self.wallet.error {
                    ui.label(egui::RichText::new("⚠").color(egui::Color32::from_rgb(220, 180, 50)))
                        .on_hover_text(error);
                }
            }
        }
    }

    fn render_feedback(&mut self, ui: &mut egui::Ui) {
        let Some(feedback) = self.feedback.clone() else {
            return;
        };
        ui.horizontal(|ui| {
            match &feedback {
                ActionFeedback::Notice(message) => ui::notice_message(ui, message),
                ActionFeedback::Error(message) => ui::error_message(ui, message),
            }
            if ui.small_button("✖").clicked() {
                self.feedback = None;
            }
        });
        ui.add_space(6.0);
    }

    // =========================================================================
    // SHIPS TAB
    // =========================================================================

    fn render_ships_tab(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Ships");
        ui.label("Your fleet, and the shipyard for commissioning new hulls.");

        let address = self.bridge.current_address().ok().flatten();
        ui::section_header(ui, "Pilot");
        ui::card(ui, |ui| match &address {
            Some(address) => {
                ui.label(format!("Signed in as {}", address.short()));
                ui.label(
                    egui::RichText::new("Register the pilot on the space game contract to start.")
                        .weak(),
                );
            }
            None => {
                ui.label(egui::RichText::new("Connect a wallet to register a pilot.").weak());
            }
        });
        if let Some(address) = address {
            if ui::primary_button(ui, "Initialize Player").clicked() {
                self.dispatch(GameCommand::InitializePlayer { player: address });
            }
        }

        ui::section_header(ui, "Shipyard");
        let ship_types = self.bridge.config().ship_types.clone();
        for ship_type in &ship_types {
            ui::card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&ship_type.name).strong());
                    ui.label(
                        egui::RichText::new(format!("Cost: {} ENERGY", ship_type.cost)).weak(),
                    );
                });
            });
            if ui::secondary_button(ui, &format!("Build {}", ship_type.name)).clicked() {
                self.create_ship.open = true;
                self.create_ship.selected_type = ship_type.id.clone();
            }
            ui.add_space(4.0);
        }

        ui::section_header(ui, "Fleet");
        let ships = self.ships.clone();
        for ship in &ships {
            let type_name = self
                .bridge
                .config()
                .ship_type(&ship.ship_type)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| ship.ship_type.clone());
            ui::card(ui, |ui| {
                ui.label(egui::RichText::new(&ship.name).strong().size(16.0));
                ui::kv_line(ui, "Type", &type_name);
                ui::kv_line(ui, "Health", &format!("{}%", ship.health));
                ui::kv_line(ui, "Cargo", &ship.cargo.to_string());
                for (resource, amount) in &ship.resources {
                    ui::kv_line(ui, resource, &amount.to_string());
                }
            });
            ui.add_space(6.0);
        }
    }

    // =========================================================================
    // STAR SYSTEMS TAB
    // =========================================================================

    fn render_star_systems_tab(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Star Systems");
        ui.label("Chart nearby systems and claim discoveries.");

        ui::section_header(ui, "Star Map");
        ui::card(ui, |ui| {
            ui.label(egui::RichText::new("Star map coming soon").weak());
        });

        ui::section_header(ui, "Nearby Systems");
        let stars = self.stars.clone();
        for star in &stars {
            ui::card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&star.name).strong().size(16.0));
                    if star.discovered {
                        ui.label(egui::RichText::new("✔ discovered").color(ui::ACCENT));
                    } else {
                        ui.label(egui::RichText::new("uncharted").weak());
                    }
                });
                ui::kv_line(ui, "Distance", &format!("{} light years", star.distance_ly));
                for (resource, amount) in &star.resources {
                    ui::kv_line(ui, resource, &amount.to_string());
                }
            });
            if !star.discovered
                && ui::secondary_button(ui, &format!("Discover {}", star.name)).clicked()
            {
                self.dispatch(GameCommand::DiscoverStar {
                    star_name: star.name.clone(),
                });
            }
            ui.add_space(6.0);
        }
    }

    // =========================================================================
    // MISSIONS TAB
    // =========================================================================

    fn render_missions_tab(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Missions");
        ui.label("Track progress and claim completed objectives.");

        let completed = self.missions.iter().filter(|m| m.completed).count();
        ui::section_header(ui, "Mission Log");
        ui::card(ui, |ui| {
            ui::kv_line(ui, "Total completed", &completed.to_string());
            ui::kv_line(ui, "Rewards earned", "0");
        });

        ui::section_header(ui, "Active Missions");
        let missions = self.missions.clone();
        for mission in &missions {
            ui::card(ui, |ui| {
                ui.label(egui::RichText::new(&mission.name).strong().size(16.0));
                ui.label(egui::RichText::new(&mission.description).weak());
                ui::kv_line(
                    ui,
                    "Reward",
                    &format!("{} {}", mission.reward_amount, mission.reward_resource),
                );
                ui::kv_line(
                    ui,
                    "Stars",
                    &format!("{} / {}", mission.stars, mission.required_stars),
                );
                for (resource, collected, required) in &mission.resource_progress {
                    ui::kv_line(ui, resource, &format!("{collected} / {required}"));
                }
            });
            if ui::secondary_button(ui, "Check Completion").clicked() {
                self.dispatch(GameCommand::CheckMissionCompletion {
                    mission_id: mission.id.clone(),
                });
            }
            ui.add_space(6.0);
        }
    }

    // =========================================================================
    // TRADING TAB
    // =========================================================================

    fn render_trading_tab(&mut self, ui: &mut egui::Ui) {
        ui::styled_heading(ui, "Trading");
        ui.label("Open resource offers from other pilots.");

        ui::section_header(ui, "Create Trade Offer");
        if ui::primary_button(ui, "New Trade").clicked() {
            self.create_trade.open = true;
        }

        ui::section_header(ui, "Open Offers");
        let trades = self.trades.clone();
        for trade in &trades {
            ui::card(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(format!("Offer #{}", trade.id)).strong());
                    ui.label(egui::RichText::new(&trade.seller).monospace().weak());
                });
                ui::kv_line(
                    ui,
                    "Selling",
                    &format!("{} {}", trade.sell_amount, trade.sell_resource),
                );
                ui::kv_line(
                    ui,
                    "Asking",
                    &format!("{} {}", trade.buy_amount, trade.buy_resource),
                );
            });
            if ui::secondary_button(ui, "Accept").clicked() {
                self.dispatch(GameCommand::AcceptTradeOffer { offer_id: trade.id });
            }
            ui.add_space(6.0);
        }
    }

    // =========================================================================
    // MODALS
    // =========================================================================

    fn render_create_ship_modal(&mut self, ctx: &egui::Context) {
        let mut open = self.create_ship.open;
        let mut submit: Option<GameCommand> = None;
        let ship_types = self.bridge.config().ship_types.clone();

        egui::Window::new("Create New Ship")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Ship name:");
                ui.text_edit_singleline(&mut self.create_ship.name);
                ui.add_space(8.0);

                ui.label("Ship type:");
                for ship_type in &ship_types {
                    ui.radio_value(
                        &mut self.create_ship.selected_type,
                        ship_type.id.clone(),
                        format!("{} ({} ENERGY)", ship_type.name, ship_type.cost),
                    );
                }
                ui.add_space(12.0);

                let can_create = !self.create_ship.name.trim().is_empty()
                    && !self.create_ship.selected_type.is_empty();
                ui.horizontal(|ui| {
                    if ui::primary_button_enabled(ui, "Create Ship", can_create).clicked() {
                        submit = Some(GameCommand::CreateShip {
                            name: self.create_ship.name.trim().to_owned(),
                            ship_type: self.create_ship.selected_type.clone(),
                        });
                    }
                    if ui::secondary_button(ui, "Cancel").clicked() {
                        self.create_ship = CreateShipState::default();
                    }
                });
            });

        self.create_ship.open = open && self.create_ship.open;
        if let Some(command) = submit {
            self.dispatch(command);
            self.create_ship = CreateShipState::default();
        }
    }

    fn render_create_trade_modal(&mut self, ctx: &egui::Context) {
        let mut open = self.create_trade.open;
        let mut submit = false;
        let resources = self.bridge.config().resources.clone();

        egui::Window::new("Create Trade Offer")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Selling:");
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_salt("sell_resource")
                        .selected_text(if self.create_trade.sell_resource.is_empty() {
                            "resource"
                        } else {
                            self.create_trade.sell_resource.as_str()
                        })
                        .show_ui(ui, |ui| {
                            for resource in &resources {
                                ui.selectable_value(
                                    &mut self.create_trade.sell_resource,
                                    resource.id.clone(),
                                    &resource.name,
                                );
                            }
                        });
                    ui::number_input(ui, &mut self.create_trade.sell_amount, "amount");
                });
                ui.add_space(8.0);

                ui.label("Asking for:");
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_salt("buy_resource")
                        .selected_text(if self.create_trade.buy_resource.is_empty() {
                            "resource"
                        } else {
                            self.create_trade.buy_resource.as_str()
                        })
                        .show_ui(ui, |ui| {
                            for resource in &resources {
                                ui.selectable_value(
                                    &mut self.create_trade.buy_resource,
                                    resource.id.clone(),
                                    &resource.name,
                                );
                            }
                        });
                    ui::number_input(ui, &mut self.create_trade.buy_amount, "amount");
                });
                ui.add_space(12.0);

                let can_create = !self.create_trade.sell_resource.is_empty()
                    && !self.create_trade.buy_resource.is_empty();
                ui.horizontal(|ui| {
                    if ui::primary_button_enabled(ui, "Create Offer", can_create).clicked() {
                        submit = true;
                    }
                    if ui::secondary_button(ui, "Cancel").clicked() {
                        self.create_trade = CreateTradeState::default();
                    }
                });
            });

        self.create_trade.open = open && self.create_trade.open;
        if submit {
            self.submit_trade_offer();
        }
    }

    fn submit_trade_offer(&mut self) {
        let (Ok(sell_amount), Ok(buy_amount)) = (
            self.create_trade.sell_amount.trim().parse::<i64>(),
            self.create_trade.buy_amount.trim().parse::<i64>(),
        ) else {
            self.feedback = Some(ActionFeedback::Error(
                "trade amounts must be whole numbers".to_owned(),
            ));
            return;
        };
        let command = GameCommand::CreateTradeOffer {
            sell_resource: self.create_trade.sell_resource.clone(),
            sell_amount,
            buy_resource: self.create_trade.buy_resource.clone(),
            buy_amount,
        };
        self.dispatch(command);
        self.create_trade = CreateTradeState::default();
    }

    // =========================================================================
    // SESSION PLUMBING
    // =========================================================================

    fn dispatch(&mut self, command: GameCommand) {
        let kind = command_kind(&command);
        match self.bridge.dispatch(command) {
            Ok(_) => {
                self.feedback = Some(ActionFeedback::Notice(format!("{kind} submitted")));
            }
            Err(SessionError::NotImplemented(entry_point)) => {
                tracing::info!(entry_point, "game action is not wired to a deployed contract");
                self.feedback = Some(ActionFeedback::Notice(format!(
                    "{entry_point} is not wired to the deployed contracts yet"
                )));
            }
            Err(SessionError::NotConnected) => {
                self.feedback = Some(ActionFeedback::Error(
                    "connect a wallet before dispatching game actions".to_owned(),
                ));
            }
            Err(e) => {
                tracing::warn!("game action {kind} failed: {e}");
                self.feedback = Some(ActionFeedback::Error(e.to_string()));
            }
        }
    }

    fn trigger_connect(&mut self, ctx: &egui::Context) {
        if self.wallet.is_connecting {
            return;
        }
        self.wallet.is_connecting = true;
        self.wallet.error = None;

        let bridge = self.bridge.clone();
        let result = Arc::clone(&self.connect_result);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let outcome = bridge.connect();
            let mut guard = result.lock().unwrap();
            *guard = Some(match outcome {
                Ok(command_result) => match command_result.address {
                    Some(address) => ConnectResult::Success(address),
                    None => ConnectResult::Error("signing agent returned no address".to_owned()),
                },
                Err(e) => ConnectResult::Error(e.to_string()),
            });
            ctx.request_repaint();
        });
    }

    fn check_connect_result(&mut self, ctx: &egui::Context) {
        let result = {
            let mut guard = self.connect_result.lock().unwrap();
            guard.take()
        };

        if let Some(result) = result {
            self.wallet.is_connecting = false;
            match result {
                ConnectResult::Success(address) => {
                    tracing::info!(address = %address.short(), "wallet connected");
                    self.trigger_balance_fetch(ctx, address);
                }
                ConnectResult::Error(error) => {
                    tracing::warn!("wallet connect failed: {error}");
                    self.wallet.error = Some(error);
                }
            }
        }
    }

    fn disconnect(&mut self) {
        match self.bridge.disconnect() {
            Ok(_) => {
                tracing::info!("wallet disconnected");
                self.wallet.clear_balance();
                self.wallet.error = None;
            }
            Err(e) => {
                self.feedback = Some(ActionFeedback::Error(e.to_string()));
            }
        }
    }

    fn trigger_balance_fetch(&mut self, ctx: &egui::Context, address: AccountId) {
        self.wallet.clear_balance();
        self.wallet.balance_loading = true;

        let horizon_url = self.bridge.config().network.horizon_url.clone();
        let result = Arc::clone(&self.balance_result);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let fetch = rt.block_on(crate::api::fetch_native_balance(
                &horizon_url,
                address.as_str(),
            ));
            let mut guard = result.lock().unwrap();
            *guard = Some(match fetch {
                Ok(balance) => BalanceResult::Success(balance),
                Err(e) => BalanceResult::Error(format!("{e:#}")),
            });
            ctx.request_repaint();
        });
    }

    fn check_balance_result(&mut self) {
        let result = {
            let mut guard = self.balance_result.lock().unwrap();
            guard.take()
        };

        if let Some(result) = result {
            self.wallet.balance_loading = false;
            match result {
                BalanceResult::Success(balance) => {
                    self.wallet.balance = Some(balance);
                }
                BalanceResult::Error(error) => {
                    tracing::warn!("balance fetch failed: {error}");
                    self.wallet.balance_error = Some(error);
                }
            }
        }
    }
}
