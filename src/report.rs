/// Console report for a completed registration
use crate::{registration::RegistrationReceipt, workflow::IpAssetRegistration};
use std::fmt;

pub struct Report<'a> {
    receipt: &'a RegistrationReceipt,
    explorer_url: &'a str,
    dry_run: bool,
}

impl<'a> Report<'a> {
    pub fn new(receipt: &'a RegistrationReceipt, explorer_url: &'a str) -> Self {
        Self {
            receipt,
            explorer_url,
            dry_run: false,
        }
    }

    /// Report for a finished run, flagging simulated receipts
    pub fn for_registration(registration: &'a IpAssetRegistration, explorer_url: &'a str) -> Self {
        Self::new(&registration.receipt, explorer_url).dry_run(registration.dry_run)
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Browsable asset page
    pub fn asset_url(&self) -> String {
        format!("{}/ipa/{}", self.explorer_url.trim_end_matches('/'), self.receipt.ip_id)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            return write!(
                f,
                "Dry run: no transaction submitted (simulated hash {}, IPA ID: {})",
                self.receipt.tx_hash, self.receipt.ip_id
            );
        }

        writeln!(
            f,
            "Root IPA created at transaction hash {}, IPA ID: {}",
            self.receipt.tx_hash, self.receipt.ip_id
        )?;
        write!(f, "View on the explorer: {}", self.asset_url())
    }
}
