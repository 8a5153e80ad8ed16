//! Placeholder library target for the workspace-level tooling package.
