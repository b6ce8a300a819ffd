// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Template pool for team logo descriptions

/// Placeholder replaced with the key elements in generic templates
pub const ELEMENTS_PLACEHOLDER: &str = "{elements}";

/// Generic templates, each carrying one `{elements}` placeholder
pub const GENERIC_TEMPLATES: [&str; 9] = [
    "Une équipe qui incarne {elements}, prête à dominer l'arène avec stratégie et détermination.",
    "Représentant {elements}, cette équipe est forgée dans l'esprit de compétition et d'excellence.",
    "Avec {elements} comme emblème, cette formation est déterminée à marquer l'histoire des compétitions.",
    "Portant fièrement {elements}, l'équipe s'élance vers la victoire avec passion et courage.",
    "L'esprit de {elements} guide cette équipe vers les sommets de la gloire et du succès.",
    "Symbole de puissance avec {elements}, cette formation redoutable ne connaît pas la défaite.",
    "Incarnant {elements}, les membres de cette équipe brillent par leur talent et leur cohésion.",
    "Cette formation élite représente {elements}, synonyme d'excellence dans chaque compétition.",
    "Portant l'emblème de {elements}, cette équipe inspire respect et admiration à ses adversaires.",
];

/// Number of team-specific templates
pub const TEAM_TEMPLATE_COUNT: usize = 4;

/// Render the team-specific templates for `team` and `key`
pub fn team_templates(team: &str, key: &str) -> [String; TEAM_TEMPLATE_COUNT] {
    [
        format!("L'équipe {team}, arborant {key}, est prête à conquérir tous les défis."),
        format!("Avec {key} comme symbole, {team} s'impose comme une force incontournable."),
        format!("{team}, représentant {key}, est une équipe dont la légende ne fait que commencer."),
        format!(
            "Les champions de {team} portent fièrement {key}, symbole de leur unité et détermination."
        ),
    ]
}

/// One entry of the working pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    /// Still holds the `{elements}` placeholder
    Generic(&'static str),
    /// Team name and key elements already interpolated
    Rendered(String),
}

impl Template {
    /// Produce the final description text
    ///
    /// Rendered templates are returned as-is, so a team name containing
    /// `{elements}` is never substituted a second time.
    pub fn render(&self, key_elements: &str) -> String {
        match self {
            Template::Generic(text) => text.replace(ELEMENTS_PLACEHOLDER, key_elements),
            Template::Rendered(text) => text.clone(),
        }
    }
}

/// Build the full working pool: generic templates followed by team templates
pub fn build_pool(team: &str, key_elements: &str) -> Vec<Template> {
    let mut pool: Vec<Template> = GENERIC_TEMPLATES
        .iter()
        .copied()
        .map(Template::Generic)
        .collect();
    pool.extend(
        team_templates(team, key_elements)
            .into_iter()
            .map(Template::Rendered),
    );
    pool
}
