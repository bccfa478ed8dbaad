// Copyright (c) Saverly.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod dashboard;
pub mod doctor;
pub mod exporter;
pub mod goal;
pub mod reports;
pub mod transactions;
