// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! One time-step of per-element values

use super::Statistics;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-element value storage, one entry per mesh element of the placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DatasetValues {
    /// One double per element
    Scalar(Vec<f64>),
    /// X/Y pair per element
    Vector(Vec<[f64; 2]>),
}

impl DatasetValues {
    pub fn len(&self) -> usize {
        match self {
            DatasetValues::Scalar(values) => values.len(),
            DatasetValues::Vector(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One time-step's worth of per-element values plus validity state
///
/// Inactive elements keep their stored value but the value carries no
/// meaning; statistics and rendering skip them. The whole-dataset validity
/// flag is separate: a dataset parsed from a malformed row stays in place,
/// marked invalid, so time-step indices of its group remain aligned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    time: f64,
    values: DatasetValues,
    active: Vec<bool>,
    valid: bool,
}

impl Dataset {
    pub fn new_scalar(time: f64, values: Vec<f64>) -> Self {
        let active = vec![true; values.len()];
        Self {
            time,
            values: DatasetValues::Scalar(values),
            active,
            valid: true,
        }
    }

    pub fn new_vector(time: f64, values: Vec<[f64; 2]>) -> Self {
        let active = vec![true; values.len()];
        Self {
            time,
            values: DatasetValues::Vector(values),
            active,
            valid: true,
        }
    }

    /// Time of this step, in hours
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.values, DatasetValues::Scalar(_))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let count = self.values.len();
        if index >= count {
            return Err(Error::OutOfRange { index, count });
        }
        Ok(())
    }

    pub fn scalar_value(&self, index: usize) -> Result<f64> {
        self.check_index(index)?;
        match &self.values {
            DatasetValues::Scalar(values) => Ok(values[index]),
            DatasetValues::Vector(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn vector_value(&self, index: usize) -> Result<[f64; 2]> {
        self.check_index(index)?;
        match &self.values {
            DatasetValues::Vector(values) => Ok(values[index]),
            DatasetValues::Scalar(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn set_scalar_value(&mut self, index: usize, value: f64) -> Result<()> {
        self.check_index(index)?;
        match &mut self.values {
            DatasetValues::Scalar(values) => {
                values[index] = value;
                Ok(())
            }
            DatasetValues::Vector(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn set_vector_value(&mut self, index: usize, value: [f64; 2]) -> Result<()> {
        self.check_index(index)?;
        match &mut self.values {
            DatasetValues::Vector(values) => {
                values[index] = value;
                Ok(())
            }
            DatasetValues::Scalar(_) => Err(Error::TypeMismatch),
        }
    }

    pub fn active(&self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        Ok(self.active[index])
    }

    pub fn set_active(&mut self, index: usize, active: bool) -> Result<()> {
        self.check_index(index)?;
        self.active[index] = active;
        Ok(())
    }

    /// Whether this dataset as a whole was populated successfully
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Min/max over active elements; `None` when no active finite value exists
    pub fn statistics(&self) -> Option<Statistics> {
        let mut stats: Option<Statistics> = None;
        for index in 0..self.values.len() {
            if !self.active[index] {
                continue;
            }
            let value = match &self.values {
                DatasetValues::Scalar(values) => values[index],
                DatasetValues::Vector(values) => {
                    let [x, y] = values[index];
                    (x * x + y * y).sqrt()
                }
            };
            if !value.is_finite() {
                continue;
            }
            stats = Statistics::merge(stats, Some(Statistics::single(value)));
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_access() {
        let dataset = Dataset::new_scalar(0.0, vec![20.0, 30.0, 40.0]);
        assert_eq!(dataset.value_count(), 3);
        assert!(dataset.is_scalar());
        assert!(dataset.is_valid());
        assert_eq!(dataset.scalar_value(1).unwrap(), 30.0);
        assert!(dataset.active(0).unwrap());
    }

    #[test]
    fn test_type_mismatch() {
        let scalar = Dataset::new_scalar(0.0, vec![1.0]);
        assert!(matches!(scalar.vector_value(0), Err(Error::TypeMismatch)));

        let vector = Dataset::new_vector(0.0, vec![[1.0, 2.0]]);
        assert!(matches!(vector.scalar_value(0), Err(Error::TypeMismatch)));
        assert_eq!(vector.vector_value(0).unwrap(), [1.0, 2.0]);
    }

    #[test]
    fn test_out_of_range() {
        let dataset = Dataset::new_scalar(0.0, vec![1.0, 2.0]);
        assert!(matches!(
            dataset.scalar_value(2),
            Err(Error::OutOfRange { index: 2, count: 2 })
        ));
        assert!(dataset.active(2).is_err());
    }

    #[test]
    fn test_statistics_skip_inactive() {
        let mut dataset = Dataset::new_scalar(0.0, vec![5.0, -2.0, 100.0]);
        dataset.set_active(2, false).unwrap();
        let stats = dataset.statistics().unwrap();
        assert_eq!(stats.minimum, -2.0);
        assert_eq!(stats.maximum, 5.0);
    }

    #[test]
    fn test_statistics_empty_when_all_inactive() {
        let mut dataset = Dataset::new_scalar(0.0, vec![5.0, 6.0]);
        dataset.set_active(0, false).unwrap();
        dataset.set_active(1, false).unwrap();
        assert!(dataset.statistics().is_none());
    }

    #[test]
    fn test_vector_statistics_use_magnitude() {
        let dataset = Dataset::new_vector(0.0, vec![[3.0, 4.0], [0.0, 1.0]]);
        let stats = dataset.statistics().unwrap();
        assert_relative_eq!(stats.minimum, 1.0);
        assert_relative_eq!(stats.maximum, 5.0);
    }

    #[test]
    fn test_invalid_flag() {
        let mut dataset = Dataset::new_scalar(1.5, vec![1.0]);
        dataset.set_valid(false);
        assert!(!dataset.is_valid());
        assert_eq!(dataset.time(), 1.5);
    }
}
