// Client-side filtering — local, synchronous profanity detection.
//
// The ProfanityList holds the shared word list, the ViolationClassifier
// matches text against a snapshot of it, and the ClientSideFilter applies
// the mode policy on top. Nothing in here touches the network.

pub mod classifier;
pub mod client_side;
pub mod result;
pub mod violation;
pub mod words;
