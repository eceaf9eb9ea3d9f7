pub mod border;
pub mod gaussian;

pub use border::BorderMode;
pub use gaussian::{gaussian_blur, gaussian_kernel, KernelSize};
