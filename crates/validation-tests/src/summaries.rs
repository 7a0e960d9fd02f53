//! Summary-only scenarios, as used by upstream UIs before table names are
//! configured.
