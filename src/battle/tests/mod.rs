pub(crate) mod common;

#[cfg(test)]
mod test_move_resolution;

#[cfg(test)]
mod test_action_prevention;




#[cfg(test)]
mod test_critical_hits;
