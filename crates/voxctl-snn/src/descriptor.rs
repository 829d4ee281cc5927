// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Converter Descriptors
//!
//! Serializable recipes for converters. A pipeline needs one independent converter
//! per channel, so descriptors build fresh instances on every call rather than
//! sharing one.
//!
//! ```toml
//! [encoder]
//! kind = "uniform_with_memory"
//! frequency = { min_frequency = 0.0, max_frequency = 50.0 }
//!
//! [decoder]
//! kind = "moving_average"
//! window = 5
//! ```

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use voxctl_structures::ConfigurationError;

use crate::coding::{FrequencyRange, DEFAULT_MOVING_AVERAGE_WINDOW};
use crate::continuous::{
    AverageFrequencySpikeTrainToValueConverter, MovingAverageSpikeTrainToValueConverter,
    SpikeTrainToValueConverter, UniformValueToSpikeTrainConverter,
    UniformWithMemoryValueToSpikeTrainConverter, ValueToSpikeTrainConverter,
};
use crate::quantized::{
    QuantizedAverageFrequencySpikeTrainToValueConverter,
    QuantizedMovingAverageSpikeTrainToValueConverter, QuantizedSpikeTrainToValueConverter,
    QuantizedUniformValueToSpikeTrainConverter,
    QuantizedUniformWithMemoryValueToSpikeTrainConverter, QuantizedValueToSpikeTrainConverter,
};

fn default_window() -> usize {
    DEFAULT_MOVING_AVERAGE_WINDOW
}

fn array_size_of(array_size: usize) -> Result<NonZeroUsize, ConfigurationError> {
    NonZeroUsize::new(array_size).ok_or_else(|| {
        ConfigurationError::InvalidParameter("quantized array size must be at least 1".to_string())
    })
}

//region Value To Spike Train

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueToSpikeTrainDescriptor {
    Uniform {
        #[serde(default)]
        frequency: FrequencyRange,
    },
    UniformWithMemory {
        #[serde(default)]
        frequency: FrequencyRange,
    },
}

impl Default for ValueToSpikeTrainDescriptor {
    fn default() -> Self {
        ValueToSpikeTrainDescriptor::UniformWithMemory {
            frequency: FrequencyRange::default(),
        }
    }
}

impl ValueToSpikeTrainDescriptor {
    pub fn frequency(&self) -> FrequencyRange {
        match self {
            ValueToSpikeTrainDescriptor::Uniform { frequency }
            | ValueToSpikeTrainDescriptor::UniformWithMemory { frequency } => *frequency,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.frequency().validate()
    }

    pub fn build(&self) -> Result<Box<dyn ValueToSpikeTrainConverter>, ConfigurationError> {
        self.validate()?;
        let converter: Box<dyn ValueToSpikeTrainConverter> = match *self {
            ValueToSpikeTrainDescriptor::Uniform { frequency } => {
                Box::new(UniformValueToSpikeTrainConverter::new(frequency))
            }
            ValueToSpikeTrainDescriptor::UniformWithMemory { frequency } => {
                Box::new(UniformWithMemoryValueToSpikeTrainConverter::new(frequency))
            }
        };
        Ok(converter)
    }

    pub fn build_quantized(
        &self,
        array_size: usize,
    ) -> Result<Box<dyn QuantizedValueToSpikeTrainConverter>, ConfigurationError> {
        self.validate()?;
        let array_size = array_size_of(array_size)?;
        let converter: Box<dyn QuantizedValueToSpikeTrainConverter> = match *self {
            ValueToSpikeTrainDescriptor::Uniform { frequency } => Box::new(
                QuantizedUniformValueToSpikeTrainConverter::new(frequency, array_size),
            ),
            ValueToSpikeTrainDescriptor::UniformWithMemory { frequency } => Box::new(
                QuantizedUniformWithMemoryValueToSpikeTrainConverter::new(frequency, array_size),
            ),
        };
        Ok(converter)
    }

    /// `count` independent converters. The descriptor is validated even when `count` is zero.
    pub fn build_channels(
        &self,
        count: usize,
    ) -> Result<Vec<Box<dyn ValueToSpikeTrainConverter>>, ConfigurationError> {
        self.validate()?;
        std::iter::repeat_with(|| self.build()).take(count).collect()
    }

    pub fn build_quantized_channels(
        &self,
        count: usize,
        array_size: usize,
    ) -> Result<Vec<Box<dyn QuantizedValueToSpikeTrainConverter>>, ConfigurationError> {
        self.validate()?;
        array_size_of(array_size)?;
        std::iter::repeat_with(|| self.build_quantized(array_size))
            .take(count)
            .collect()
    }
}

//endregion

//region Spike Train To Value

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpikeTrainToValueDescriptor {
    AverageFrequency {
        #[serde(default)]
        frequency: FrequencyRange,
    },
    MovingAverage {
        #[serde(default)]
        frequency: FrequencyRange,
        #[serde(default = "default_window")]
        window: usize,
    },
}

impl Default for SpikeTrainToValueDescriptor {
    fn default() -> Self {
        SpikeTrainToValueDescriptor::MovingAverage {
            frequency: FrequencyRange::default(),
            window: DEFAULT_MOVING_AVERAGE_WINDOW,
        }
    }
}

impl SpikeTrainToValueDescriptor {
    pub fn frequency(&self) -> FrequencyRange {
        match self {
            SpikeTrainToValueDescriptor::AverageFrequency { frequency }
            | SpikeTrainToValueDescriptor::MovingAverage { frequency, .. } => *frequency,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.frequency().validate()?;
        if let SpikeTrainToValueDescriptor::MovingAverage { window: 0, .. } = self {
            return Err(ConfigurationError::InvalidParameter(
                "moving average window must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn build(&self) -> Result<Box<dyn SpikeTrainToValueConverter>, ConfigurationError> {
        self.validate()?;
        let converter: Box<dyn SpikeTrainToValueConverter> = match *self {
            SpikeTrainToValueDescriptor::AverageFrequency { frequency } => {
                Box::new(AverageFrequencySpikeTrainToValueConverter::new(frequency))
            }
            SpikeTrainToValueDescriptor::MovingAverage { frequency, window } => {
                Box::new(MovingAverageSpikeTrainToValueConverter::new(frequency, window))
            }
        };
        Ok(converter)
    }

    pub fn build_quantized(
        &self,
    ) -> Result<Box<dyn QuantizedSpikeTrainToValueConverter>, ConfigurationError> {
        self.validate()?;
        let converter: Box<dyn QuantizedSpikeTrainToValueConverter> = match *self {
            SpikeTrainToValueDescriptor::AverageFrequency { frequency } => {
                Box::new(QuantizedAverageFrequencySpikeTrainToValueConverter::new(frequency))
            }
            SpikeTrainToValueDescriptor::MovingAverage { frequency, window } => Box::new(
                QuantizedMovingAverageSpikeTrainToValueConverter::new(frequency, window),
            ),
        };
        Ok(converter)
    }

    pub fn build_channels(
        &self,
        count: usize,
    ) -> Result<Vec<Box<dyn SpikeTrainToValueConverter>>, ConfigurationError> {
        self.validate()?;
        std::iter::repeat_with(|| self.build()).take(count).collect()
    }

    pub fn build_quantized_channels(
        &self,
        count: usize,
    ) -> Result<Vec<Box<dyn QuantizedSpikeTrainToValueConverter>>, ConfigurationError> {
        self.validate()?;
        std::iter::repeat_with(|| self.build_quantized())
            .take(count)
            .collect()
    }
}

//endregion
