use std::borrow::Cow;

/// Provider identifier - the upstream hostname, mostly static constants
pub type ProviderId = Cow<'static, str>;
