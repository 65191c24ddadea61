//! Canned tool output and configuration text

/// A typical configuration: reserved sections, comments and two shares.
pub const SMB_CONF: &str = "\
# Global parameters
[global]
   workgroup = WORKGROUP
   server string = %h server (Samba)
   ; logging
   log file = /var/log/samba/log.%m
   map to guest = bad user

[printers]
   comment = All Printers
   path = /var/spool/samba
   printable = yes

[print$]
   comment = Printer Drivers
   path = /var/lib/samba/printers

# media library, managed by hand
[media]
   path = /data/media
   read only = yes
   valid users = @family

[scratch]
   path = /srv/scratch
   write list = alice
";

/// `df -h` output with a root disk, a data disk and virtual filesystems.
pub const DF_OUTPUT: &str = "\
Filesystem      Size  Used Avail Use% Mounted on
udev            3.9G     0  3.9G   0% /dev
tmpfs           796M  1.7M  794M   1% /run
/dev/sda1        98G   41G   52G  44% /
tmpfs           3.9G     0  3.9G   0% /dev/shm
/dev/sdb1       1.8T  900G  850G  52% /data
";

/// `du -sh` output for `path`.
pub fn du_output(size: &str, path: &str) -> String {
    format!("{}\t{}\n", size, path)
}
