//! Concrete window systems

pub mod glfw;

pub use self::glfw::{GlfwContext, GlfwWindow, GlfwWindowSystem};
