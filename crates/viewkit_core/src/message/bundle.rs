//! Built-in diagnostic templates for the standard converters.
//!
//! Hosts load their own localized bundles on top of this table; these
//! default-locale entries guarantee the built-in converters can always
//! render a diagnostic.

use crate::convert::big_integer;
use crate::convert::boolean;
use crate::convert::converter::STRING_TEMPLATE;
use crate::message::resolver::{MessageTemplate, TemplateTable, DEFAULT_LOCALE};

/// Returns the default-locale templates for every built-in template id.
pub fn default_templates() -> TemplateTable {
    let mut table = TemplateTable::new();
    table.insert(
        DEFAULT_LOCALE,
        big_integer::INVALID_TEMPLATE,
        MessageTemplate::with_detail(
            "{2}: `{0}` must be a whole number.",
            "{2}: `{0}` must be a whole number consisting of one or more digits. Example: {1}.",
        ),
    );
    table.insert(
        DEFAULT_LOCALE,
        boolean::INVALID_TEMPLATE,
        MessageTemplate::with_detail(
            "{2}: `{0}` must be `true` or `false`.",
            "{2}: `{0}` must be `true` or `false`. Any value other than `true` is rejected, not \
             coerced to `false`. Example: {1}.",
        ),
    );
    table.insert(
        DEFAULT_LOCALE,
        STRING_TEMPLATE,
        MessageTemplate::summary("{1}: could not render `{0}` as text."),
    );
    table
}
