pub mod pitch;
