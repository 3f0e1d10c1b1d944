//! Names of the meta table columns created by the indicators.
//!
//! The figures look columns up by these names, so both sides use the functions here.

use iamcompare_core::Year;

pub fn gdp(year: Year, scenario: &str) -> String {
    format!("GDP {year} {scenario}")
}

pub fn carbon_intensity(year: Year) -> String {
    format!("Carbon intensity {year}")
}

pub fn energy_intensity(year: Year) -> String {
    format!("Energy intensity {year}")
}

/// Share of the intensity reduction achieved through decarbonisation
pub fn coei(year: Year) -> String {
    format!("CoEI {year}")
}

pub fn policy_cost(year: Year) -> String {
    format!("Policy cost {year}")
}

pub fn policy_cost_per_gdp(year: Year) -> String {
    format!("Policy cost {year} per GDP")
}

pub fn emissions_cav(year: Year) -> String {
    format!("Emissions CAV {year}")
}

pub fn emissions_cav_base(year: Year) -> String {
    format!("Emissions CAV {year} base")
}

pub fn cav(year: Year) -> String {
    format!("CAV {year}")
}

/// e.g. `RAI c80 2050 CO2 FFI`
pub fn rai(tag: &str, year: Year, label: &str) -> String {
    format!("RAI {tag} {year} {label}")
}

pub fn carbon_price(tag: &str, year: Year) -> String {
    format!("Carbon price {tag} {year}")
}

/// e.g. `Primary Energy|Fossil|w/ CCS 2050`
pub fn primary_energy(suffix: &str, year: Year) -> String {
    format!("Primary Energy|{suffix} {year}")
}

pub fn ffr(year: Year) -> String {
    format!("FFR {year}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(gdp(2050, "diag-base"), "GDP 2050 diag-base");
        assert_eq!(rai("c80", 2100, "CO2 FFI"), "RAI c80 2100 CO2 FFI");
        assert_eq!(policy_cost_per_gdp(2050), "Policy cost 2050 per GDP");
        assert_eq!(
            primary_energy("Fossil|w/o CCS", 2050),
            "Primary Energy|Fossil|w/o CCS 2050"
        );
    }
}
