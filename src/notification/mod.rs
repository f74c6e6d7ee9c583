//! Task lifecycle notifications.
//!
//! Task services publish a [`domain::TaskEvent`] after every successful
//! task mutation. The [`services::NotificationHub`] forwards it to each
//! subscribed [`ports::TaskListener`] in subscription order, isolating
//! failures so one listener cannot affect the mutation or its peers.
//!
//! Ready-made listeners live in [`listeners`].

pub mod domain;
pub mod listeners;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
