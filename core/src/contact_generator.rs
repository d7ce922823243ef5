//! Deterministic postal and electronic contact details.
//!
//! Streets, cities, states, ZIP codes, phone numbers, e-mail
//! addresses and IPv4 addresses come from the `fake` en locale,
//! driven by the calling table's SubsystemRng so that output stays
//! reproducible per seed.

use crate::rng::SubsystemRng;
use fake::faker::address::en::{
    BuildingNumber, CityName, SecondaryAddress, StateAbbr, StreetName, ZipCode,
};
use fake::faker::internet::en::{DomainSuffix, FreeEmail, Username, IPv4};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use std::net::Ipv4Addr;

/// One postal address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostalAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Addresses `ContactGenerator::ipv4` can return: first octets 1..=223
/// without 10 and 127, times 2^24 for the remaining three octets.
pub const USABLE_IPV4_ADDRESSES: u64 = 221 << 24;

pub struct ContactGenerator;

impl ContactGenerator {
    pub fn street_address(rng: &mut SubsystemRng) -> String {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        if rng.chance(0.25) {
            let unit: String = SecondaryAddress().fake_with_rng(rng);
            format!("{number} {street} {unit}")
        } else {
            format!("{number} {street}")
        }
    }

    pub fn city(rng: &mut SubsystemRng) -> String {
        CityName().fake_with_rng(rng)
    }

    pub fn state_abbr(rng: &mut SubsystemRng) -> String {
        StateAbbr().fake_with_rng(rng)
    }

    /// Five-digit ZIP. The ZIP+4 suffix the locale sometimes adds is cut.
    pub fn zip_code(rng: &mut SubsystemRng) -> String {
        let zip: String = ZipCode().fake_with_rng(rng);
        zip.chars().take(5).collect()
    }

    pub fn postal_address(rng: &mut SubsystemRng) -> PostalAddress {
        PostalAddress {
            street: Self::street_address(rng),
            city: Self::city(rng),
            state: Self::state_abbr(rng),
            zip_code: Self::zip_code(rng),
        }
    }

    pub fn phone_number(rng: &mut SubsystemRng) -> String {
        PhoneNumber().fake_with_rng(rng)
    }

    /// Personal e-mail on a free-mail domain.
    pub fn email(rng: &mut SubsystemRng) -> String {
        let email: String = FreeEmail().fake_with_rng(rng);
        email.to_lowercase()
    }

    /// Business e-mail on a domain derived from the company name.
    pub fn company_email(rng: &mut SubsystemRng, company: &str) -> String {
        let slug = company
            .split(|c: char| !c.is_ascii_alphanumeric())
            .find(|part| !part.is_empty())
            .unwrap_or("company")
            .to_lowercase();
        let user: String = Username().fake_with_rng(rng);
        let tld: String = DomainSuffix().fake_with_rng(rng);
        format!("{}@{slug}.{tld}", user.to_lowercase())
    }

    /// Random routable-looking IPv4 address. Skips 0/8, 10/8, 127/8
    /// and the multicast/reserved blocks above 223.
    pub fn ipv4(rng: &mut SubsystemRng) -> Ipv4Addr {
        loop {
            let raw: String = IPv4().fake_with_rng(rng);
            if let Ok(ip) = raw.parse::<Ipv4Addr>() {
                let first = ip.octets()[0];
                if (1..=223).contains(&first) && first != 10 && first != 127 {
                    return ip;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{RngBank, StreamSlot};

    #[test]
    fn zip_codes_have_five_digits() {
        let mut rng = RngBank::new(5).for_stream(StreamSlot::Stores);
        for _ in 0..200 {
            let zip = ContactGenerator::zip_code(&mut rng);
            assert_eq!(zip.len(), 5, "bad zip {zip}");
            assert!(zip.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn states_are_two_letter_codes() {
        let mut rng = RngBank::new(5).for_stream(StreamSlot::Customers);
        for _ in 0..100 {
            let state = ContactGenerator::state_abbr(&mut rng);
            assert_eq!(state.len(), 2, "bad state {state}");
            assert!(state.chars().all(|c| c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn ipv4_avoids_reserved_first_octets() {
        let mut rng = RngBank::new(5).for_stream(StreamSlot::Enrichment);
        for _ in 0..2_000 {
            let ip = ContactGenerator::ipv4(&mut rng);
            let first = ip.octets()[0];
            assert!((1..=223).contains(&first), "bad first octet in {ip}");
            assert_ne!(first, 10);
            assert_ne!(first, 127);
        }
    }

    #[test]
    fn usable_ipv4_count_matches_octet_rule() {
        let first_octets = (1u64..=223).filter(|o| *o != 10 && *o != 127).count() as u64;
        assert_eq!(USABLE_IPV4_ADDRESSES, first_octets * 256 * 256 * 256);
    }

    #[test]
    fn emails_are_well_formed() {
        let mut rng = RngBank::new(5).for_stream(StreamSlot::Customers);
        for _ in 0..100 {
            let email = ContactGenerator::email(&mut rng);
            assert_eq!(email.matches('@').count(), 1, "bad email {email}");
            assert_eq!(email, email.to_lowercase());

            let biz = ContactGenerator::company_email(&mut rng, "Hill, Cook and Ross");
            assert!(biz.contains("@hill."), "unexpected company email {biz}");
        }
    }

    #[test]
    fn same_stream_same_address() {
        let mut a = RngBank::new(77).for_stream(StreamSlot::Suppliers);
        let mut b = RngBank::new(77).for_stream(StreamSlot::Suppliers);
        assert_eq!(
            ContactGenerator::postal_address(&mut a),
            ContactGenerator::postal_address(&mut b)
        );
        assert_eq!(ContactGenerator::phone_number(&mut a), ContactGenerator::phone_number(&mut b));
    }
}
