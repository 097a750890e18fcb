//! Drivers compiled into this build.

use dbprobe_core::DriverRegistry;

/// Build the registry of every driver enabled through cargo features.
pub fn registry() -> DriverRegistry {
    #[allow(unused_mut)]
    let mut registry = DriverRegistry::new();

    #[cfg(feature = "mssql")]
    {
        registry = registry.with(dbprobe_mssql::MssqlDriver::new());
    }

    #[cfg(feature = "oracle")]
    {
        registry = registry.with(dbprobe_oracle::OracleDriver::new());
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbprobe_core::DriverFamily;

    #[test]
    fn test_registry_matches_features() {
        let families: Vec<_> = registry().families().collect();
        assert_eq!(families.contains(&DriverFamily::SqlServer), cfg!(feature = "mssql"));
        assert_eq!(families.contains(&DriverFamily::Oracle), cfg!(feature = "oracle"));
    }
}
