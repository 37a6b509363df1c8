//! Core type definitions for content blocker rules
//!
//! These types mirror the JSON rule list format consumed by the browser's
//! content blocking engine. All of them are plain immutable values; nothing is
//! validated at construction time.

use std::fmt;

// =============================================================================
// Action Types
// =============================================================================

/// Fieldless tag of an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    /// Cancels the request
    Block,
    /// Strips cookies from the request
    BlockCookies,
    /// Hides elements matching a selector
    CssDisplayNone,
    /// Exception - discards actions of rules evaluated before this one
    IgnorePreviousRules,
    /// Upgrades the request to https
    MakeHttps,
}

impl ActionType {
    pub const ALL: [ActionType; 5] = [
        Self::Block,
        Self::BlockCookies,
        Self::CssDisplayNone,
        Self::IgnorePreviousRules,
        Self::MakeHttps,
    ];

    /// Canonical wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::BlockCookies => "block-cookies",
            Self::CssDisplayNone => "css-display-none",
            Self::IgnorePreviousRules => "ignore-previous-rules",
            Self::MakeHttps => "make-https",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// =============================================================================
// Action
// =============================================================================

/// Effect applied when a trigger matches.
///
/// Only `css-display-none` carries a selector, so an action can never hold a
/// selector it would not use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Block,
    BlockCookies,
    CssDisplayNone { selector: String },
    IgnorePreviousRules,
    MakeHttps,
}

impl Action {
    pub fn css_display_none(selector: impl Into<String>) -> Self {
        Self::CssDisplayNone {
            selector: selector.into(),
        }
    }

    pub fn action_type(&self) -> ActionType {
        match self {
            Self::Block => ActionType::Block,
            Self::BlockCookies => ActionType::BlockCookies,
            Self::CssDisplayNone { .. } => ActionType::CssDisplayNone,
            Self::IgnorePreviousRules => ActionType::IgnorePreviousRules,
            Self::MakeHttps => ActionType::MakeHttps,
        }
    }

    pub fn selector(&self) -> Option<&str> {
        match self {
            Self::CssDisplayNone { selector } => Some(selector),
            _ => None,
        }
    }
}

// =============================================================================
// Resource Types
// =============================================================================

/// Kind of resource a request loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Document,
    Image,
    StyleSheet,
    Script,
    Font,
    Raw,
    SvgDocument,
    Media,
    Popup,
}

impl ResourceType {
    pub const ALL: [ResourceType; 9] = [
        Self::Document,
        Self::Image,
        Self::StyleSheet,
        Self::Script,
        Self::Font,
        Self::Raw,
        Self::SvgDocument,
        Self::Media,
        Self::Popup,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Image => "image",
            Self::StyleSheet => "style-sheet",
            Self::Script => "script",
            Self::Font => "font",
            Self::Raw => "raw",
            Self::SvgDocument => "svg-document",
            Self::Media => "media",
            Self::Popup => "popup",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn mask(self) -> ResourceTypeMask {
        match self {
            Self::Document => ResourceTypeMask::DOCUMENT,
            Self::Image => ResourceTypeMask::IMAGE,
            Self::StyleSheet => ResourceTypeMask::STYLE_SHEET,
            Self::Script => ResourceTypeMask::SCRIPT,
            Self::Font => ResourceTypeMask::FONT,
            Self::Raw => ResourceTypeMask::RAW,
            Self::SvgDocument => ResourceTypeMask::SVG_DOCUMENT,
            Self::Media => ResourceTypeMask::MEDIA,
            Self::Popup => ResourceTypeMask::POPUP,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

bitflags::bitflags! {
    /// Resource type bit mask (set view of a resource type list).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResourceTypeMask: u16 {
        const DOCUMENT = 1 << 0;
        const IMAGE = 1 << 1;
        const STYLE_SHEET = 1 << 2;
        const SCRIPT = 1 << 3;
        const FONT = 1 << 4;
        const RAW = 1 << 5;
        const SVG_DOCUMENT = 1 << 6;
        const MEDIA = 1 << 7;
        const POPUP = 1 << 8;
    }
}

impl FromIterator<ResourceType> for ResourceTypeMask {
    fn from_iter<I: IntoIterator<Item = ResourceType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |mask, t| mask | t.mask())
    }
}

// =============================================================================
// Load Types
// =============================================================================

/// Party of a request relative to the page that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadType {
    FirstParty,
    ThirdParty,
}

impl LoadType {
    pub const ALL: [LoadType; 2] = [Self::FirstParty, Self::ThirdParty];

    pub fn tag(self) -> &'static str {
        match self {
            Self::FirstParty => "first-party",
            Self::ThirdParty => "third-party",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag)
    }

    pub fn mask(self) -> LoadTypeMask {
        match self {
            Self::FirstParty => LoadTypeMask::FIRST_PARTY,
            Self::ThirdParty => LoadTypeMask::THIRD_PARTY,
        }
    }
}

impl fmt::Display for LoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

bitflags::bitflags! {
    /// Load type mask (first-party / third-party).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LoadTypeMask: u8 {
        const FIRST_PARTY = 1 << 0;
        const THIRD_PARTY = 1 << 1;
        /// Matches both
        const ALL = Self::FIRST_PARTY.bits() | Self::THIRD_PARTY.bits();
    }
}

impl FromIterator<LoadType> for LoadTypeMask {
    fn from_iter<I: IntoIterator<Item = LoadType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), |mask, t| mask | t.mask())
    }
}

// =============================================================================
// URL Selection
// =============================================================================

/// Domain or top-URL restriction. Exactly one form is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UrlSelection {
    IfDomain(Vec<String>),
    UnlessDomain(Vec<String>),
    IfTopUrl(Vec<String>),
    UnlessTopUrl(Vec<String>),
}

/// Variant of a [`UrlSelection`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlSelectionKind {
    IfDomain,
    UnlessDomain,
    IfTopUrl,
    UnlessTopUrl,
}

impl UrlSelectionKind {
    /// Wire key of the sibling field carrying this variant.
    pub fn key(self) -> &'static str {
        match self {
            Self::IfDomain => "if-domain",
            Self::UnlessDomain => "unless-domain",
            Self::IfTopUrl => "if-top-url",
            Self::UnlessTopUrl => "unless-top-url",
        }
    }
}

impl UrlSelection {
    pub fn new(kind: UrlSelectionKind, patterns: Vec<String>) -> Self {
        match kind {
            UrlSelectionKind::IfDomain => Self::IfDomain(patterns),
            UrlSelectionKind::UnlessDomain => Self::UnlessDomain(patterns),
            UrlSelectionKind::IfTopUrl => Self::IfTopUrl(patterns),
            UrlSelectionKind::UnlessTopUrl => Self::UnlessTopUrl(patterns),
        }
    }

    pub fn kind(&self) -> UrlSelectionKind {
        match self {
            Self::IfDomain(_) => UrlSelectionKind::IfDomain,
            Self::UnlessDomain(_) => UrlSelectionKind::UnlessDomain,
            Self::IfTopUrl(_) => UrlSelectionKind::IfTopUrl,
            Self::UnlessTopUrl(_) => UrlSelectionKind::UnlessTopUrl,
        }
    }

    pub fn patterns(&self) -> &[String] {
        match self {
            Self::IfDomain(p)
            | Self::UnlessDomain(p)
            | Self::IfTopUrl(p)
            | Self::UnlessTopUrl(p) => p,
        }
    }
}

// =============================================================================
// Trigger
// =============================================================================

/// Match condition of a rule. Absent optional fields restrict nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trigger {
    /// Opaque regex-like pattern matched against the request URL
    pub url_filter: String,
    pub url_filter_case_sensitive: Option<bool>,
    pub resource_types: Option<Vec<ResourceType>>,
    pub load_types: Option<Vec<LoadType>>,
    pub url_selection: Option<UrlSelection>,
}

impl Trigger {
    pub fn new(url_filter: impl Into<String>) -> Self {
        Self {
            url_filter: url_filter.into(),
            url_filter_case_sensitive: None,
            resource_types: None,
            load_types: None,
            url_selection: None,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.url_filter_case_sensitive = Some(case_sensitive);
        self
    }

    pub fn with_resource_types(mut self, types: Vec<ResourceType>) -> Self {
        self.resource_types = Some(types);
        self
    }

    pub fn with_load_types(mut self, types: Vec<LoadType>) -> Self {
        self.load_types = Some(types);
        self
    }

    pub fn with_url_selection(mut self, selection: UrlSelection) -> Self {
        self.url_selection = Some(selection);
        self
    }
}

// =============================================================================
// Rule
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub trigger: Trigger,
    pub action: Action,
}

impl Rule {
    pub fn new(trigger: Trigger, action: Action) -> Self {
        Self { trigger, action }
    }
}
