mod homing;
mod scenarios;
mod simulation;
mod support;
