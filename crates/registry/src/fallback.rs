//! Plugins announced on the site before they have a repository

use crate::plugin::{Plugin, PluginStatus};

fn coming_soon(id: &str, name: &str, description: &str) -> Plugin {
    Plugin {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        author: Some("Treeline".to_string()),
        repo: String::new(),
        featured: false,
        status: PluginStatus::ComingSoon,
    }
}

/// The hardcoded "coming soon" entries, in display order
pub fn coming_soon_plugins() -> Vec<Plugin> {
    vec![
        coming_soon(
            "net-worth",
            "Net Worth Tracker",
            "Track your total net worth over time. See how your assets and liabilities change month to month.",
        ),
        coming_soon(
            "fire-calculator",
            "FIRE Calculator",
            "Calculate your path to financial independence based on your actual spending and savings rate.",
        ),
    ]
}
