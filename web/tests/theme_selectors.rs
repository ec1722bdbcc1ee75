#![cfg(test)]
/*!
Theme selector lint for the web build.

Every class below is emitted by a component in `ui/src/components` or
`ui/src/views`. Renaming one in markup without touching the theme (or the
other way round) fails here instead of silently unstyling the page.

When adding structural CSS that a component relies on, add its selector to
REQUIRED_SELECTORS.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".visually-hidden",
    ".header {",
    ".dashboard {",
    ".card {",
    // Buttons & inputs
    ".button {",
    ".button--primary",
    ".button--secondary",
    ".button--accent",
    ".button--ghost",
    ".button--danger",
    ".input,",
    // Backends
    ".backend-item {",
    ".backend-item--selected",
    ".backend-item--disabled",
    ".status-dot--on",
    ".plan-limitation",
    ".settings-panel",
    // Workspace
    ".language-selector",
    ".swap-button",
    ".input-tab--active",
    ".upload-area--dragover",
    ".image-preview",
    ".file-info",
    ".export-controls",
    ".spinner",
    ".output__placeholder",
    // Account & billing
    ".auth-tab--active",
    ".user-profile",
    ".plan-badge--pro",
    ".usage-stats",
    ".modal {",
    ".modal__content--wide",
    ".plan-card--featured",
    ".plan-card__badge",
    ".payment-method {",
    // Toasts
    ".toast--success",
    ".toast--error",
    // Responsive block
    "@media (max-width:",
];

#[test]
fn theme_contains_required_selectors() {
    let missing: Vec<_> = REQUIRED_SELECTORS
        .iter()
        .filter(|sel| !THEME_CSS.contains(*sel))
        .collect();
    assert!(
        missing.is_empty(),
        "Theme is missing selectors required by components: {missing:?}"
    );
}
