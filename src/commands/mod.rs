// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod doctor;
pub mod exporter;
pub mod health;
pub mod journal;
pub mod ppn;
pub mod reports;
