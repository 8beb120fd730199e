// LabSim: Multi-vendor network lab simulator written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Test module

use crate::{
    catalog,
    lab::LabInstance,
    types::{Vendor, VendorFamily},
};

/// Load a lab from the catalog.
pub(crate) fn lab(id: &str) -> LabInstance {
    catalog::lab(id).unwrap()
}

/// Send a command line and return the lines it printed, without the echoed prompt.
pub(crate) fn output(lab: &mut LabInstance, id: &str, line: &str) -> Vec<String> {
    let echo = lab.prompt(id).unwrap().lines().count();
    let before = lab.device(id).unwrap().history.len();
    let device = lab.execute(id, line).unwrap();
    device.history[before + echo..].to_vec()
}

/// A vendor that uses the command family.
pub(crate) fn vendor_of(family: VendorFamily) -> Vendor {
    match family {
        VendorFamily::Cisco => Vendor::Cisco,
        VendorFamily::Juniper => Vendor::Juniper,
        VendorFamily::Fortinet => Vendor::Fortinet,
        VendorFamily::PaloAlto => Vendor::PaloAlto,
        VendorFamily::Cloud => Vendor::Internet,
    }
}

/// Execute a sequence of command lines on a device.
macro_rules! run {
    ($lab: expr, $id: expr, $($line: expr),+ $(,)?) => {
        $( $lab.execute($id, $line).unwrap(); )+
    };
}

/// Execute a command line and compare everything it printed.
macro_rules! assert_output {
    ($lab: expr, $id: expr, $line: expr, [$($exp: expr),* $(,)?]) => {
        let acq = crate::test::output(&mut $lab, $id, $line);
        let exp: Vec<String> = vec![$($exp.to_string()),*];
        pretty_assertions::assert_eq!(acq, exp)
    };
}

/// Execute a command line and check that one of the printed lines equals the expected one.
macro_rules! assert_prints {
    ($lab: expr, $id: expr, $line: expr, $exp: expr) => {
        let acq = crate::test::output(&mut $lab, $id, $line);
        assert!(
            acq.iter().any(|l| l == $exp),
            "`{}` did not print {:?}. Output:\n{}",
            $line,
            $exp,
            acq.join("\n")
        );
    };
}

/// Check the prompt of a device.
macro_rules! assert_prompt {
    ($lab: expr, $id: expr, $exp: expr) => {
        pretty_assertions::assert_eq!($lab.prompt($id).unwrap(), $exp)
    };
}

mod test_fortinet;
mod test_neighbors;
mod test_paloalto;
mod test_prompt;
mod test_registry;
mod test_simulation;
