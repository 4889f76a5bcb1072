//! Typed query methods for retrieving climate data from the database.
//!
//! All queries return typed structs from [`crate::models`].
//!
//! # Row Order
//!
//! Queries that return observation lists carry no date ordering of their own;
//! they return rows in the table's natural order, made explicit as `ORDER BY id`
//! so that callers folding rows (later rows overwrite earlier ones) see a
//! stable sequence.
//!
//! # Date Comparison
//!
//! Dates are `YYYY-MM-DD` strings and compared as text. Callers are
//! responsible for passing well-formed dates; a malformed bound simply
//! compares lexicographically.

use crate::models::{DatePrecipitation, DateTobs, Station, StationActivity, TemperatureStats};
use crate::Database;
use rusqlite::{params, OptionalExtension};

impl Database {
    /// Get the latest observation date across all measurements.
    ///
    /// Returns `None` when the `measurement` table is empty.
    pub fn query_max_date(&self) -> anyhow::Result<Option<String>> {
        let conn = self.conn()?;
        let max_date = conn
            .query_row(
                "SELECT date FROM measurement ORDER BY date DESC LIMIT 1",
                [],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        log::info!("query: query_max_date returned {:?}", max_date);
        Ok(max_date)
    }

    /// Get every (date, precipitation) pair with `date >= start`.
    pub fn query_precipitation_since(&self, start: &str) -> anyhow::Result<Vec<DatePrecipitation>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, prcp FROM measurement
             WHERE date >= ?1
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![start], |row| {
                Ok(DatePrecipitation {
                    date: row.get(0)?,
                    prcp: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_precipitation_since returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// Get all stations with full metadata, in natural table order.
    pub fn query_stations(&self) -> anyhow::Result<Vec<Station>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT station, name, latitude, longitude, elevation FROM station
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Station {
                    station: row.get(0)?,
                    name: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    elevation: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_stations returned {} records", rows.len());
        Ok(rows)
    }

    /// Get the station with the most measurement rows.
    ///
    /// Ties on the count resolve to the lowest station identifier. Returns
    /// `None` when the `measurement` table is empty.
    pub fn query_most_active_station(&self) -> anyhow::Result<Option<StationActivity>> {
        let conn = self.conn()?;
        let most_active = conn
            .query_row(
                "SELECT station, COUNT(*) AS n FROM measurement
                 GROUP BY station
                 ORDER BY n DESC, station ASC
                 LIMIT 1",
                [],
                |row| {
                    Ok(StationActivity {
                        station: row.get(0)?,
                        count: row.get(1)?,
                    })
                },
            )
            .optional()?;
        log::info!(
            "query: query_most_active_station returned {:?}",
            most_active
        );
        Ok(most_active)
    }

    /// Get every (date, temperature observation) pair for one station with `date >= start`.
    pub fn query_tobs_since(&self, station: &str, start: &str) -> anyhow::Result<Vec<DateTobs>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT date, tobs FROM measurement
             WHERE station = ?1 AND date >= ?2
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![station, start], |row| {
                Ok(DateTobs {
                    date: row.get(0)?,
                    tobs: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_tobs_since returned {} records", rows.len());
        Ok(rows)
    }

    /// Get MIN/AVG/MAX of the temperature observation for `start <= date <= end`.
    ///
    /// An empty range is not an error: all three aggregates come back `None`.
    pub fn query_temperature_stats(&self, start: &str, end: &str) -> anyhow::Result<TemperatureStats> {
        let conn = self.conn()?;
        let stats = conn.query_row(
            "SELECT MIN(tobs), AVG(tobs), MAX(tobs) FROM measurement
             WHERE date >= ?1 AND date <= ?2",
            params![start, end],
            |row| {
                Ok(TemperatureStats {
                    tmin: row.get(0)?,
                    tavg: row.get(1)?,
                    tmax: row.get(2)?,
                })
            },
        )?;
        log::info!(
            "query: query_temperature_stats({}, {}) returned {:?}",
            start,
            end,
            stats
        );
        Ok(stats)
    }

    /// Number of rows in `measurement`.
    pub fn count_measurements(&self) -> anyhow::Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM measurement", [], |row| row.get(0))?)
    }

    /// Number of rows in `station`.
    pub fn count_stations(&self) -> anyhow::Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM station", [], |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use crate::models::TemperatureStats;
    use crate::Database;

    /// Helper to create a database with a small two-year sample.
    fn sample_db() -> Database {
        let db = Database::new().unwrap();

        let stations_csv = "\
station,name,latitude,longitude,elevation
USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0
USC00513117,\"KANEOHE 838.1, HI US\",21.4234,-157.8015,14.6
USC00519281,\"WAIHEE 837.5, HI US\",21.45167,-157.84889,32.9
";
        db.load_stations(stations_csv).unwrap();

        // USC00519281 has the most rows (4), USC00519397 has 3, USC00513117 has 2.
        let measurements_csv = "\
station,date,prcp,tobs
USC00519397,2016-01-01,0.05,66
USC00519397,2016-08-23,0.00,81
USC00519397,2017-08-23,0.00,81
USC00513117,2016-08-22,0.15,74
USC00513117,2017-08-20,,78
USC00519281,2015-06-01,0.10,70
USC00519281,2016-08-24,1.45,77
USC00519281,2017-01-15,0.20,
USC00519281,2017-08-18,0.06,79
";
        db.load_measurements(measurements_csv).unwrap();

        db
    }

    #[test]
    fn query_max_date_is_latest() {
        let db = sample_db();
        assert_eq!(db.query_max_date().unwrap().as_deref(), Some("2017-08-23"));
    }

    #[test]
    fn query_max_date_empty_table() {
        let db = Database::new().unwrap();
        assert!(db.query_max_date().unwrap().is_none());
    }

    #[test]
    fn query_precipitation_since_is_inclusive() {
        let db = sample_db();
        let rows = db.query_precipitation_since("2016-08-23").unwrap();
        let dates: Vec<&str> = rows.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2016-08-23", "2017-08-23", "2017-08-20", "2016-08-24", "2017-01-15", "2017-08-18"]
        );
        assert!(rows.iter().all(|r| r.date.as_str() >= "2016-08-23"));
    }

    #[test]
    fn query_precipitation_keeps_null_readings() {
        let db = sample_db();
        let rows = db.query_precipitation_since("2017-08-20").unwrap();
        let missing = rows.iter().find(|r| r.date == "2017-08-20").unwrap();
        assert_eq!(missing.prcp, None);
    }

    #[test]
    fn query_stations_in_table_order() {
        let db = sample_db();
        let stations = db.query_stations().unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.station.as_str()).collect();
        assert_eq!(ids, vec!["USC00519397", "USC00513117", "USC00519281"]);
        assert_eq!(stations[2].name, "WAIHEE 837.5, HI US");
    }

    #[test]
    fn query_most_active_station_by_row_count() {
        let db = sample_db();
        let most_active = db.query_most_active_station().unwrap().unwrap();
        assert_eq!(most_active.station, "USC00519281");
        assert_eq!(most_active.count, 4);
    }

    #[test]
    fn query_most_active_station_tie_is_stable() {
        let db = Database::new().unwrap();
        db.load_measurements(
            "station,date,prcp,tobs\nB,2017-01-01,0,70\nA,2017-01-01,0,70\nB,2017-01-02,0,70\nA,2017-01-02,0,70\n",
        )
        .unwrap();
        let first = db.query_most_active_station().unwrap().unwrap();
        let second = db.query_most_active_station().unwrap().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.count, 2);
    }

    #[test]
    fn query_most_active_station_empty_table() {
        let db = Database::new().unwrap();
        assert!(db.query_most_active_station().unwrap().is_none());
    }

    #[test]
    fn query_tobs_since_filters_station_and_date() {
        let db = sample_db();
        let rows = db.query_tobs_since("USC00519281", "2016-08-23").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].date, "2016-08-24");
        assert_eq!(rows[0].tobs, Some(77.0));
        assert_eq!(rows[1].tobs, None);
        assert_eq!(rows[2].date, "2017-08-18");
    }

    #[test]
    fn query_tobs_since_unknown_station() {
        let db = sample_db();
        assert!(db.query_tobs_since("NOPE", "2000-01-01").unwrap().is_empty());
    }

    #[test]
    fn query_temperature_stats_inclusive_range() {
        let db = sample_db();
        let stats = db
            .query_temperature_stats("2016-08-22", "2016-08-24")
            .unwrap();
        assert_eq!(stats.tmin, Some(74.0));
        assert_eq!(stats.tmax, Some(81.0));
        let avg = stats.tavg.unwrap();
        assert!((avg - (74.0 + 81.0 + 77.0) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn query_temperature_stats_ignores_null_tobs() {
        let db = sample_db();
        // Only 2017-01-15 is in range and its tobs is NULL.
        let stats = db
            .query_temperature_stats("2017-01-01", "2017-01-31")
            .unwrap();
        assert_eq!(stats, TemperatureStats::default());
    }

    #[test]
    fn query_temperature_stats_empty_range() {
        let db = sample_db();
        let stats = db
            .query_temperature_stats("2099-01-01", "2099-12-31")
            .unwrap();
        assert!(stats.tmin.is_none());
        assert!(stats.tavg.is_none());
        assert!(stats.tmax.is_none());
    }

    #[test]
    fn query_temperature_stats_min_avg_max_ordering() {
        let db = sample_db();
        let stats = db
            .query_temperature_stats("2010-01-01", "2017-12-31")
            .unwrap();
        let (min, avg, max) = (
            stats.tmin.unwrap(),
            stats.tavg.unwrap(),
            stats.tmax.unwrap(),
        );
        assert!(min <= avg && avg <= max);
    }

    #[test]
    fn counts() {
        let db = sample_db();
        assert_eq!(db.count_measurements().unwrap(), 9);
        assert_eq!(db.count_stations().unwrap(), 3);
    }
}
