//! # Placard
//!
//! A print-native ID-card layout engine.
//!
//! Most card-print tooling renders each card onto a screen-sized canvas and
//! hopes the browser's print dialog slices the result into pages. That
//! produces cards split across page boundaries, drifting margins, and
//! reprints of whole batches over one bad sheet.
//!
//! Placard does the opposite: **the page is the fundamental unit of
//! layout.** Every card is placed whole on a page, in physical millimetres,
//! with the page boundary as a hard constraint. Cards flow *into* pages,
//! never across them.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]     — Print job: raw template, entity records, role
//!       ↓
//!   [template]  — Resolve raw template into concrete dimensions
//!       ↓
//!   [fields]    — Map entity attributes to card lines
//!       ↓
//!   [card]      — Render one entity into a positioned card face
//!       ↓
//!   [layout]    — Compose card faces into a paginated grid
//!       ↓
//!   [print]     — Hand the sheet to a print backend
//! ```

pub mod assets;
pub mod card;
pub mod error;
pub mod fields;
pub mod layout;
pub mod model;
pub mod photo;
pub mod print;
pub mod template;

pub use error::PlacardError;

use assets::AssetResolver;
use card::CardFace;
use layout::SheetLayout;
use model::{Entity, PrintJob, Role};
use template::CardTemplate;

/// Deployment-specific settings the composer needs beyond the job itself.
#[derive(Debug, Clone)]
pub struct ComposerConfig {
    /// Base URL prepended to relative asset paths.
    pub asset_base_url: String,
    pub student_placeholder_url: String,
    pub staff_placeholder_url: String,
    /// Page size used when the job doesn't name one.
    pub page: model::PageSize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            asset_base_url: "http://localhost:4000".to_string(),
            student_placeholder_url: "http://localhost:4000/static/placeholder-student.png"
                .to_string(),
            staff_placeholder_url: "http://localhost:4000/static/placeholder-staff.png"
                .to_string(),
            page: model::PageSize::A4,
        }
    }
}

impl ComposerConfig {
    /// The placeholder photo for a role.
    pub fn placeholder_for(&self, role: Role) -> &str {
        match role {
            Role::Student => &self.student_placeholder_url,
            Role::Staff => &self.staff_placeholder_url,
        }
    }
}

/// The engine front door: resolves the job's template, renders every
/// record, and composes the paginated sheet.
pub struct Composer {
    config: ComposerConfig,
    assets: AssetResolver,
}

impl Composer {
    pub fn new(config: ComposerConfig) -> Self {
        let assets = AssetResolver::new(&config.asset_base_url);
        Composer { config, assets }
    }

    /// Compose a print job into a sheet layout.
    ///
    /// The job must carry a template, a user batch, and a role; anything
    /// else missing degrades to defaults.
    pub fn compose(&self, job: &PrintJob) -> Result<SheetLayout, PlacardError> {
        let raw = job
            .template
            .as_ref()
            .ok_or_else(|| PlacardError::Precondition("print job has no template".to_string()))?;
        let users = job
            .users
            .as_ref()
            .ok_or_else(|| PlacardError::Precondition("print job has no users".to_string()))?;
        let role = job
            .role
            .ok_or_else(|| PlacardError::Precondition("print job has no role".to_string()))?;

        let template = CardTemplate::resolve(raw);

        let mut cards: Vec<CardFace> = Vec::with_capacity(users.len());
        for value in users {
            let entity = Entity::from_value(role, value)?;
            cards.push(card::render_card(&entity, &template, &self.assets, &self.config));
        }

        let page = job.page.unwrap_or(self.config.page);
        let sheet = layout::compose_sheet(
            cards,
            template.width_mm,
            template.height_mm,
            job.grid_gap,
            page,
        );
        log::debug!(
            "composed {} cards onto {} pages ({} columns)",
            sheet.card_count(),
            sheet.pages.len(),
            sheet.columns
        );
        Ok(sheet)
    }

    /// Compose a print job described as JSON.
    pub fn compose_json(&self, json: &str) -> Result<SheetLayout, PlacardError> {
        let job: PrintJob = serde_json::from_str(json)?;
        self.compose(&job)
    }
}
