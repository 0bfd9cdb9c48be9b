//! Table model derivation
//!
//! Turns (fetch state, dark-mode flag, viewport) into everything the renderer
//! draws: theme, density, header and one row per clan. Rows are sorted by
//! total score, highest first, and every row carries exactly
//! [`MEMBER_COLUMNS`] member cells so the grid stays aligned.

use crate::data::{LoadState, ViewportSize};
use crate::types::{AssetUrls, Group, LeaderboardPayload};
use serde::Serialize;

/// Fixed number of member columns per row
pub const MEMBER_COLUMNS: usize = 10;

/// Viewports narrower than this use the compact density
pub const COMPACT_WIDTH_THRESHOLD: u32 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Glyph of the toggle control: shows the mode a press switches to
    pub fn toggle_glyph(&self) -> &'static str {
        match self {
            ThemeMode::Light => "☾",
            ThemeMode::Dark => "☀",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Compact,
    Standard,
}

impl Density {
    pub fn for_width(width: u32) -> Self {
        if width < COMPACT_WIDTH_THRESHOLD {
            Density::Compact
        } else {
            Density::Standard
        }
    }

    /// Blank lines between rows
    pub fn row_gap(&self) -> u16 {
        match self {
            Density::Compact => 0,
            Density::Standard => 1,
        }
    }

    pub fn column_spacing(&self) -> u16 {
        match self {
            Density::Compact => 1,
            Density::Standard => 2,
        }
    }
}

/// Fetch state as shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderRow {
    pub title: String,
    /// Theme the toggle switches to when pressed
    pub toggle_target: ThemeMode,
    /// Empty until the payload arrives
    pub requirement_title: String,
    /// Empty cells after the score column
    pub placeholders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRow {
    pub group_id: u64,
    pub name: String,
    pub logo_url: String,
    pub total_score: u64,
    pub cells: Vec<MemberCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberCell {
    Member(MemberCellData),
    Empty,
}

impl MemberCell {
    pub fn member(&self) -> Option<&MemberCellData> {
        match self {
            MemberCell::Member(data) => Some(data),
            MemberCell::Empty => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberCellData {
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub admin: bool,
    pub score: u64,
    /// `"{name}: {score} {suffix}"`
    pub tooltip: String,
}

/// Everything needed to draw one frame of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableModel {
    pub theme: ThemeMode,
    pub density: Density,
    pub status: LoadStatus,
    pub header: HeaderRow,
    pub rows: Vec<GroupRow>,
}

impl TableModel {
    /// Hover text for a cell. Column 0 is the clan, 1 the score, 2.. members.
    pub fn hover_text(&self, row: usize, column: usize) -> Option<String> {
        let row = self.rows.get(row)?;
        match column {
            0 => Some(format!("{} · logo {}", row.name, row.logo_url)),
            1 => None,
            _ => {
                let member = row.cells.get(column - 2)?.member()?;
                let mut text = member.tooltip.clone();
                if let Some(url) = &member.avatar_url {
                    text.push_str(" · avatar ");
                    text.push_str(url);
                }
                Some(text)
            }
        }
    }
}

/// Derives [`TableModel`]s; holds the settings that never change during a run
#[derive(Debug, Clone)]
pub struct TableBuilder {
    title: String,
    assets: AssetUrls,
}

impl TableBuilder {
    pub fn new(title: &str, assets: AssetUrls) -> Self {
        Self {
            title: title.to_string(),
            assets,
        }
    }

    pub fn build(
        &self,
        state: &LoadState<LeaderboardPayload>,
        dark: bool,
        viewport: ViewportSize,
    ) -> TableModel {
        let theme = ThemeMode::from_dark(dark);
        let payload = state.value();

        let status = match state {
            LoadState::Pending => LoadStatus::Loading,
            LoadState::Loaded(_) => LoadStatus::Ready,
            LoadState::Failed(e) => LoadStatus::Failed(e.to_string()),
        };

        let header = HeaderRow {
            title: self.title.clone(),
            toggle_target: ThemeMode::from_dark(!dark),
            requirement_title: payload
                .map(|p| p.requirement_title.clone())
                .unwrap_or_default(),
            placeholders: MEMBER_COLUMNS,
        };

        let rows = payload
            .map(|p| {
                sorted_groups(&p.groups)
                    .into_iter()
                    .map(|group| self.group_row(group, &p.requirement_suffix))
                    .collect()
            })
            .unwrap_or_default();

        TableModel {
            theme,
            density: Density::for_width(viewport.width),
            status,
            header,
            rows,
        }
    }

    fn group_row(&self, group: &Group, suffix: &str) -> GroupRow {
        let mut cells: Vec<MemberCell> = group
            .members
            .iter()
            .take(MEMBER_COLUMNS)
            .map(|member| {
                let score = group.score_of(member);
                MemberCell::Member(MemberCellData {
                    id: member.id.clone(),
                    display_name: member.display_name.clone(),
                    avatar_url: self.assets.member_avatar(&member.id),
                    admin: member.admin,
                    score,
                    tooltip: tooltip(&member.display_name, score, suffix),
                })
            })
            .collect();
        cells.resize(MEMBER_COLUMNS, MemberCell::Empty);

        GroupRow {
            group_id: group.identity.id,
            name: group.identity.display_name.clone(),
            logo_url: self.assets.group_logo(group.identity.id),
            total_score: group.total_score,
            cells,
        }
    }
}

/// Highest total first; ties keep input order. The input is left untouched.
pub fn sorted_groups(groups: &[Group]) -> Vec<&Group> {
    let mut sorted: Vec<&Group> = groups.iter().collect();
    sorted.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    sorted
}

pub fn tooltip(display_name: &str, score: u64, suffix: &str) -> String {
    format!("{}: {} {}", display_name, score, suffix)
}
