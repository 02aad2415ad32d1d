use crate::core::offer::{save_offer, ExportFormat, OfferBuilder};
use crate::core::render::{render_offer, render_partition};
use crate::core::selection::{prompt_choice, prompt_yes_no, wait_for_enter, SelectionEngine};
use crate::domain::model::{Catalog, DisplaySettings, Offer, Partition};
use crate::domain::ports::{ConfigProvider, Storage, Terminal};
use crate::utils::error::{OfferError, Result};

const MENU_TEXT: &str = "Welcome to the ShipFlex offer assistant.\n\n\
Please choose from one of the options below.\n\
\t1. See customer types.\n\
\t2. Display all available options.\n\
\t3. Offer generator.\n\
\t4. Exit.\n\
Choice (1-4): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    CustomerTypes,
    AllOptions,
    OfferGenerator,
    Exit,
}

impl MenuAction {
    fn from_choice(choice: usize) -> Self {
        match choice {
            1 => MenuAction::CustomerTypes,
            2 => MenuAction::AllOptions,
            3 => MenuAction::OfferGenerator,
            _ => MenuAction::Exit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShellSettings {
    pub display: DisplaySettings,
    pub customer_types: Vec<String>,
    pub formats: Vec<ExportFormat>,
}

impl ShellSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let formats = config
            .output_formats()
            .iter()
            .map(|f| f.parse())
            .collect::<Result<Vec<ExportFormat>>>()?;

        if config.customer_types().is_empty() {
            return Err(OfferError::Config {
                message: "at least one customer type is required".to_string(),
            });
        }

        Ok(Self {
            display: config.display().clone(),
            customer_types: config.customer_types().to_vec(),
            formats,
        })
    }
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            display: DisplaySettings::default(),
            customer_types: vec!["Private".to_string(), "Company".to_string()],
            formats: vec![ExportFormat::Txt],
        }
    }
}

/// Menu loop over a loaded catalog. The catalog is only borrowed; the shell never changes it.
pub struct Shell<'a, T: Terminal, S: Storage> {
    catalog: &'a Catalog,
    terminal: T,
    storage: S,
    settings: ShellSettings,
}

impl<'a, T: Terminal, S: Storage> Shell<'a, T, S> {
    pub fn new(catalog: &'a Catalog, terminal: T, storage: S, settings: ShellSettings) -> Self {
        Self {
            catalog,
            terminal,
            storage,
            settings,
        }
    }

    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Runs until the operator picks Exit. Only fatal errors (closed input, broken terminal) escape;
    /// an offer whose total overflows is reported and the menu comes back.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let action = self.read_menu_action()?;
            tracing::debug!("Menu action: {:?}", action);

            match action {
                MenuAction::CustomerTypes => self.display_customer_types()?,
                MenuAction::AllOptions => self.display_all_options()?,
                MenuAction::OfferGenerator => match self.generate_offer() {
                    Ok(_) => {}
                    Err(err @ OfferError::Processing { .. }) => self.report_offer_failure(&err)?,
                    Err(err) => return Err(err),
                },
                MenuAction::Exit => break,
            }
        }

        tracing::info!("👋 Session finished");
        Ok(())
    }

    fn read_menu_action(&mut self) -> Result<MenuAction> {
        let choice = prompt_choice(&mut self.terminal, 1, 4, |term| {
            term.clear_screen()?;
            term.write_str(MENU_TEXT)
        })?;
        Ok(MenuAction::from_choice(choice))
    }

    fn customer_type_listing(&self) -> String {
        let mut out = String::from("Customer types:\n");
        for (index, name) in self.settings.customer_types.iter().enumerate() {
            out.push_str(&format!("\t{}. {}.\n", index + 1, name));
        }
        out.push('\n');
        out
    }

    pub fn display_customer_types(&mut self) -> Result<()> {
        let listing = self.customer_type_listing();
        self.terminal.clear_screen()?;
        self.terminal.write_str(&listing)?;
        wait_for_enter(&mut self.terminal)
    }

    pub fn display_all_options(&mut self) -> Result<()> {
        self.terminal.clear_screen()?;
        for partition in Partition::ALL {
            let text = render_partition(
                partition,
                self.catalog.partition(partition),
                &self.settings.display,
            );
            self.terminal.write_str(&text)?;
        }
        wait_for_enter(&mut self.terminal)
    }

    /// Walks the operator through every essential category and any extras they want,
    /// then shows the priced offer and optionally saves it.
    pub fn generate_offer(&mut self) -> Result<Offer> {
        let catalog = self.catalog;
        let customer_type = self.choose_customer_type()?;
        let mut builder = OfferBuilder::new(customer_type);
        let engine = SelectionEngine::new(&self.settings.display);

        for category in &catalog.essential {
            let index = engine.choose(&mut self.terminal, category)?;
            builder.add(Partition::Essential, category, index)?;
        }

        for category in &catalog.extra {
            self.terminal.clear_screen()?;
            self.terminal.write_str("Offer generator.\n\n")?;
            let question = format!("Include extra category '{}'?", category.name);
            if prompt_yes_no(&mut self.terminal, &question, false)? {
                let index = engine.choose(&mut self.terminal, category)?;
                builder.add(Partition::Extra, category, index)?;
            }
        }

        let offer = builder.build()?;
        tracing::info!(
            "🧾 Offer generated: {} lines, total {}",
            offer.lines.len(),
            offer.total
        );

        self.terminal.clear_screen()?;
        self.terminal
            .write_str(&render_offer(&offer, &self.settings.display))?;
        self.terminal.write_str("\n")?;

        if prompt_yes_no(&mut self.terminal, "Should offer be saved to a file?", true)? {
            self.save(&offer)?;
        }

        wait_for_enter(&mut self.terminal)?;
        Ok(offer)
    }

    fn report_offer_failure(&mut self, err: &OfferError) -> Result<()> {
        tracing::error!("❌ Failed to generate offer: {}", err);
        self.terminal
            .write_str(&format!("\n{}\n\n", err.user_friendly_message()))?;
        wait_for_enter(&mut self.terminal)
    }

    fn choose_customer_type(&mut self) -> Result<String> {
        let listing = self.customer_type_listing();
        let count = self.settings.customer_types.len();
        let choice = prompt_choice(&mut self.terminal, 1, count, |term| {
            term.clear_screen()?;
            term.write_str("Offer generator.\n\n")?;
            term.write_str(&listing)?;
            term.write_str(&format!("Choice (1-{}): ", count))
        })?;
        Ok(self.settings.customer_types[choice - 1].clone())
    }

    // 存檔失敗不結束整個 session，只回報給操作者
    fn save(&mut self, offer: &Offer) -> Result<()> {
        match save_offer(&self.storage, offer, &self.settings.formats, &self.settings.display) {
            Ok(paths) => {
                self.terminal.write_str("\nOffer saved to:\n")?;
                for path in paths {
                    self.terminal.write_str(&format!("\t{}\n", path))?;
                }
            }
            Err(e) => {
                tracing::error!("❌ Failed to save offer: {}", e);
                self.terminal
                    .write_str(&format!("\n{}\n", e.user_friendly_message()))?;
            }
        }
        self.terminal.write_str("\n")
    }
}
