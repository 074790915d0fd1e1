pub mod amdgpu;
pub mod cpu;
pub mod gpu;

#[cfg(test)]
pub mod fake;
