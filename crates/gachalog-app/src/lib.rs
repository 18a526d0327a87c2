// Client runtime: configuration, the backend client, progress polling, and
// the analysis orchestrator that ties them together.

pub mod backend;
pub mod config;
pub mod loading;
pub mod orchestrator;
pub mod poller;
pub mod protocol;
