pub mod feature_flag_list;
pub mod flag_hashing;
pub mod flag_match_reason;
pub mod flag_matchers;
pub mod flag_matching;
pub mod flag_models;
pub mod flags_cache;

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod test_flag_matching;
