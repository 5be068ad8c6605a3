//! Interactive selection of the buoy and its coordinates.

use crate::stations::registry::{StationRegistry, DEFAULT_LOCATION, DEFAULT_STATION_ID};
use crate::types::station::LatLon;
use log::warn;
use std::io::{self, BufRead, Write};

/// Station id from user input. Empty or non-numeric input gives the default.
pub fn parse_station_id(input: &str) -> u32 {
    let input = input.trim();
    if input.is_empty() {
        return DEFAULT_STATION_ID;
    }
    input.parse().unwrap_or_else(|_| {
        warn!("'{}' is not a buoy id, using {}", input, DEFAULT_STATION_ID);
        DEFAULT_STATION_ID
    })
}

/// Coordinates from user input, `None` unless both parse and are in range.
pub fn parse_coordinates(latitude: &str, longitude: &str) -> Option<LatLon> {
    let latitude: f64 = latitude.trim().parse().ok()?;
    let longitude: f64 = longitude.trim().parse().ok()?;
    let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
    valid.then_some(LatLon(latitude, longitude))
}

/// Line-based question and answer over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    /// Asks for a buoy id. Blank or invalid answers give [`crate::DEFAULT_STATION_ID`].
    pub fn station_id(&mut self) -> io::Result<u32> {
        let answer = self.ask("Enter NOAA Buoy ID (e.g., 46026) or press Enter for default: ")?;
        Ok(parse_station_id(&answer))
    }

    /// Coordinates for `station_id`: from the registry when known, otherwise
    /// asked for, falling back to [`DEFAULT_LOCATION`] on bad input.
    pub fn location(&mut self, registry: &StationRegistry, station_id: u32) -> io::Result<LatLon> {
        if let Some(location) = registry.coordinates(station_id) {
            writeln!(self.output, "Using coords for Buoy {station_id}: {location}")?;
            return Ok(location);
        }

        let latitude = self.ask(&format!(
            "No coords found for Buoy {station_id}. Enter latitude (e.g., 37.75): "
        ))?;
        let longitude = self.ask("Enter longitude (e.g., -122.84): ")?;
        let location = match parse_coordinates(&latitude, &longitude) {
            Some(location) => location,
            None => {
                writeln!(self.output, "Invalid coords; using default {DEFAULT_LOCATION}")?;
                DEFAULT_LOCATION
            }
        };
        if let Some((station, km)) = registry.nearest(location) {
            writeln!(
                self.output,
                "Nearest known buoy: {} {} ({:.0} km away)",
                station.id, station.name, km
            )?;
        }
        Ok(location)
    }
}
